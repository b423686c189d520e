//! HTTP surface: DTOs, handlers, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::HoneypotHandlers;
pub use routes::honeypot_routes;
