//! GetEventsHandler - reads a decision's process history.

use std::fmt;
use std::sync::Arc;

use crate::domain::events::StageEvent;
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::domain::hats::HatColor;
use crate::ports::{DecisionRepository, EventLog};

/// Query for a decision's events, optionally narrowed to one hat.
#[derive(Debug, Clone)]
pub struct GetEventsQuery {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    /// When set, only events recorded for this hat are returned.
    pub hat: Option<HatColor>,
}

/// Error type for the events query.
#[derive(Debug, Clone)]
pub enum GetEventsError {
    DecisionNotFound(DecisionId),
    Domain(DomainError),
}

impl fmt::Display for GetEventsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetEventsError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            GetEventsError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetEventsError {}

impl From<DomainError> for GetEventsError {
    fn from(err: DomainError) -> Self {
        GetEventsError::Domain(err)
    }
}

/// Handler for the events query.
pub struct GetEventsHandler {
    repository: Arc<dyn DecisionRepository>,
    event_log: Arc<dyn EventLog>,
}

impl GetEventsHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>, event_log: Arc<dyn EventLog>) -> Self {
        Self {
            repository,
            event_log,
        }
    }

    pub async fn handle(&self, query: GetEventsQuery) -> Result<Vec<StageEvent>, GetEventsError> {
        let decision = self
            .repository
            .find_by_id(&query.decision_id)
            .await?
            .ok_or(GetEventsError::DecisionNotFound(query.decision_id))?;

        decision.authorize(&query.user_id)?;

        let events = match query.hat {
            Some(hat) => self.event_log.list_by_hat(&query.decision_id, hat).await?,
            None => self.event_log.list(&query.decision_id).await?,
        };
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDecisionRepository, InMemoryEventLog};
    use crate::domain::decision::Decision;
    use crate::domain::events::{StageEvent, StageResponses};

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    async fn seeded(repo: &InMemoryDecisionRepository, log: &InMemoryEventLog) -> Decision {
        let decision = Decision::new(
            DecisionId::new(),
            owner(),
            "Change job".to_string(),
            "desc".to_string(),
        )
        .unwrap();
        repo.save(&decision, &[]).await.unwrap();
        for hat in [HatColor::Blue, HatColor::White, HatColor::Blue] {
            log.append(&StageEvent::user_input(
                *decision.id(),
                hat,
                StageResponses::new(vec![], "note"),
            ))
            .await
            .unwrap();
        }
        decision
    }

    #[tokio::test]
    async fn returns_full_history_in_order() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let decision = seeded(&repo, &log).await;

        let handler = GetEventsHandler::new(repo, log);
        let events = handler
            .handle(GetEventsQuery {
                decision_id: *decision.id(),
                user_id: owner(),
                hat: None,
            })
            .await
            .unwrap();

        assert_eq!(events.len(), 3);
        for pair in events.windows(2) {
            assert!(!pair[1].created_at().is_before(pair[0].created_at()));
        }
    }

    #[tokio::test]
    async fn narrows_to_one_hat() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let decision = seeded(&repo, &log).await;

        let handler = GetEventsHandler::new(repo, log);
        let events = handler
            .handle(GetEventsQuery {
                decision_id: *decision.id(),
                user_id: owner(),
                hat: Some(HatColor::Blue),
            })
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.hat_color() == Some(HatColor::Blue)));
    }

    #[tokio::test]
    async fn fails_for_unknown_decision() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());

        let handler = GetEventsHandler::new(repo, log);
        let result = handler
            .handle(GetEventsQuery {
                decision_id: DecisionId::new(),
                user_id: owner(),
                hat: None,
            })
            .await;

        assert!(matches!(result, Err(GetEventsError::DecisionNotFound(_))));
    }
}
