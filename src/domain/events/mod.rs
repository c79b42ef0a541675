//! Stage event model: the append-only record of the facilitation process.
//!
//! Every stage action that carries content is recorded as a [`StageEvent`].
//! Events are never updated or deleted; history and synthesis both replay
//! the log in creation order.

mod event;
mod responses;
pub mod validator;

pub use event::{EventContent, EventType, StageEvent};
pub use responses::{QuestionAnswer, StageResponses};
