//! GetDecisionHandler - reads a decision together with its options.

use std::fmt;
use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionOption};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::DecisionRepository;

/// Query for one decision.
#[derive(Debug, Clone)]
pub struct GetDecisionQuery {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// A decision with its options, as the UI consumes it.
#[derive(Debug, Clone)]
pub struct DecisionView {
    pub decision: Decision,
    pub options: Vec<DecisionOption>,
}

/// Error type for the decision query.
#[derive(Debug, Clone)]
pub enum GetDecisionError {
    DecisionNotFound(DecisionId),
    Domain(DomainError),
}

impl fmt::Display for GetDecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetDecisionError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            GetDecisionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetDecisionError {}

impl From<DomainError> for GetDecisionError {
    fn from(err: DomainError) -> Self {
        GetDecisionError::Domain(err)
    }
}

/// Handler for the decision query.
pub struct GetDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl GetDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetDecisionQuery) -> Result<DecisionView, GetDecisionError> {
        let decision = self
            .repository
            .find_by_id(&query.decision_id)
            .await?
            .ok_or(GetDecisionError::DecisionNotFound(query.decision_id))?;

        decision.authorize(&query.user_id)?;

        let options = self.repository.find_options(&query.decision_id).await?;
        Ok(DecisionView { decision, options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDecisionRepository;
    use crate::domain::foundation::ErrorCode;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    async fn seeded(repo: &InMemoryDecisionRepository) -> Decision {
        let decision = Decision::new(
            DecisionId::new(),
            owner(),
            "Change job".to_string(),
            "desc".to_string(),
        )
        .unwrap();
        let options = vec![
            DecisionOption::new(*decision.id(), "Stay".to_string(), None, 0).unwrap(),
            DecisionOption::new(*decision.id(), "Go".to_string(), None, 1).unwrap(),
        ];
        repo.save(&decision, &options).await.unwrap();
        decision
    }

    #[tokio::test]
    async fn returns_decision_with_options() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let decision = seeded(&repo).await;

        let handler = GetDecisionHandler::new(repo);
        let view = handler
            .handle(GetDecisionQuery {
                decision_id: *decision.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(view.decision.id(), decision.id());
        assert_eq!(view.options.len(), 2);
    }

    #[tokio::test]
    async fn fails_for_unknown_decision() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let handler = GetDecisionHandler::new(repo);

        let result = handler
            .handle(GetDecisionQuery {
                decision_id: DecisionId::new(),
                user_id: owner(),
            })
            .await;

        assert!(matches!(result, Err(GetDecisionError::DecisionNotFound(_))));
    }

    #[tokio::test]
    async fn rejects_non_owner() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let decision = seeded(&repo).await;

        let handler = GetDecisionHandler::new(repo);
        let result = handler
            .handle(GetDecisionQuery {
                decision_id: *decision.id(),
                user_id: UserId::new("intruder").unwrap(),
            })
            .await;

        match result {
            Err(GetDecisionError::Domain(err)) => assert_eq!(err.code, ErrorCode::Forbidden),
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
