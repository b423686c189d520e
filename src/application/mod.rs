//! Application layer: orchestration over the domain and ports.

mod dispatch;
mod handle_message;

pub use dispatch::{CallbackDispatcher, DispatchOutcome};
pub use handle_message::{HandleMessageCommand, HandleMessageResult, MessageOrchestrator};
