//! Decision lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a decision.
///
/// `Draft` additionally serves as the "process not yet started" marker that
/// the current hat alone cannot express (see `HatSequence` on the `None`
/// ambiguity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Draft,
    InProgress,
    Completed,
}

impl DecisionStatus {
    /// Returns true once the process has produced (or refused) a synthesis.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionStatus::Completed)
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionStatus::Draft => "draft",
            DecisionStatus::InProgress => "in_progress",
            DecisionStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
