//! UpdateDecisionHandler - patches a decision's title and description.

use std::fmt;
use std::sync::Arc;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::DecisionRepository;

/// Command to patch a decision. Absent fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateDecisionCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Error type for decision updates.
#[derive(Debug, Clone)]
pub enum UpdateDecisionError {
    DecisionNotFound(DecisionId),
    Domain(DomainError),
}

impl fmt::Display for UpdateDecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateDecisionError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            UpdateDecisionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdateDecisionError {}

impl From<DomainError> for UpdateDecisionError {
    fn from(err: DomainError) -> Self {
        UpdateDecisionError::Domain(err)
    }
}

/// Handler for decision updates.
pub struct UpdateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDecisionCommand,
    ) -> Result<Decision, UpdateDecisionError> {
        let mut decision = self
            .repository
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(UpdateDecisionError::DecisionNotFound(cmd.decision_id))?;

        decision.authorize(&cmd.user_id)?;

        if let Some(title) = cmd.title {
            decision.rename(title)?;
        }
        if let Some(description) = cmd.description {
            decision.update_description(description)?;
        }

        self.repository.update(&decision).await?;
        Ok(decision)
    }
}
