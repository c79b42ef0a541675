//! Event log port: the append-only store of stage events.

use crate::domain::events::StageEvent;
use crate::domain::foundation::{DecisionId, DomainError};
use crate::domain::hats::HatColor;
use async_trait::async_trait;

/// Append-only log of stage events, keyed by decision.
///
/// There is deliberately no update operation; each append is one atomic
/// insert, so partial writes cannot exist. Reads return events in creation
/// order (ascending `created_at`), which is the replay order for history
/// rendering and synthesis.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Append one event.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, event: &StageEvent) -> Result<(), DomainError>;

    /// All events of a decision, ascending by creation time.
    async fn list(&self, decision_id: &DecisionId) -> Result<Vec<StageEvent>, DomainError>;

    /// Events of a decision recorded for one hat, ascending by creation
    /// time.
    async fn list_by_hat(
        &self,
        decision_id: &DecisionId,
        hat: HatColor,
    ) -> Result<Vec<StageEvent>, DomainError>;

    /// Remove all events of a decision.
    ///
    /// Exists solely to support deleting a decision; implementations backed
    /// by a store with `ON DELETE CASCADE` foreign keys may make this a
    /// no-op.
    async fn delete_by_decision(&self, decision_id: &DecisionId) -> Result<(), DomainError>;
}
