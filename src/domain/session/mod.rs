//! Session aggregate and its value objects.

mod aggregate;
mod detection;
mod report;
mod turn;

pub use aggregate::Session;
pub use detection::Detection;
pub use report::{FinalReport, ReportedIntelligence};
pub use turn::Turn;
