//! DeleteDecisionHandler - removes a decision with its options and events.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::{DecisionRepository, EventLog};

/// Command to delete a decision.
#[derive(Debug, Clone)]
pub struct DeleteDecisionCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// Error type for decision deletion.
#[derive(Debug, Clone)]
pub enum DeleteDecisionError {
    DecisionNotFound(DecisionId),
    Domain(DomainError),
}

impl fmt::Display for DeleteDecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteDecisionError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            DeleteDecisionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DeleteDecisionError {}

impl From<DomainError> for DeleteDecisionError {
    fn from(err: DomainError) -> Self {
        DeleteDecisionError::Domain(err)
    }
}

/// Handler for decision deletion.
pub struct DeleteDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
    event_log: Arc<dyn EventLog>,
}

impl DeleteDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>, event_log: Arc<dyn EventLog>) -> Self {
        Self {
            repository,
            event_log,
        }
    }

    pub async fn handle(&self, cmd: DeleteDecisionCommand) -> Result<(), DeleteDecisionError> {
        let decision = self
            .repository
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(DeleteDecisionError::DecisionNotFound(cmd.decision_id))?;

        decision.authorize(&cmd.user_id)?;

        // Events first: the log must never reference a decision that is
        // already gone. Stores with FK cascades make the first call a no-op.
        self.event_log.delete_by_decision(&cmd.decision_id).await?;
        self.repository.delete(&cmd.decision_id).await?;

        tracing::info!(decision_id = %cmd.decision_id, "Decision deleted");
        Ok(())
    }
}
