//! Foundation layer: value objects shared by every domain module.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DecisionId, OptionId, StageEventId, UserId};
pub use timestamp::Timestamp;
