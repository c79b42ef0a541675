//! Collaborator adapters: implementations of the question and synthesis
//! engine ports.

mod anthropic;
mod mock;

pub use anthropic::{AnthropicEngine, AnthropicEngineConfig};
pub use mock::MockEngine;
