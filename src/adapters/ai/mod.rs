//! AI service adapters.

mod mock;
mod openai;

pub use mock::{MockClassifier, MockReplyGenerator};
pub use openai::{OpenAiConfig, OpenAiEngine};
