//! Fixed conversational identities assumed by the honeypot.

mod library;

pub use library::{Persona, PersonaLibrary};
