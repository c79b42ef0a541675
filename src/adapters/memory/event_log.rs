//! In-memory implementation of EventLog.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::events::StageEvent;
use crate::domain::foundation::{DecisionId, DomainError};
use crate::domain::hats::HatColor;
use crate::ports::EventLog;

/// Append-only vector backing the EventLog port.
///
/// Append order doubles as creation order; reads sort stably by
/// `created_at`, so same-millisecond appends keep their insertion order.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<StageEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events across all decisions (test helper).
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if the log holds no events (test helper).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, event: &StageEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn list(&self, decision_id: &DecisionId) -> Result<Vec<StageEvent>, DomainError> {
        let events = self.events.lock().unwrap();
        let mut found: Vec<StageEvent> = events
            .iter()
            .filter(|e| e.decision_id() == decision_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| *e.created_at());
        Ok(found)
    }

    async fn list_by_hat(
        &self,
        decision_id: &DecisionId,
        hat: HatColor,
    ) -> Result<Vec<StageEvent>, DomainError> {
        let all = self.list(decision_id).await?;
        Ok(all
            .into_iter()
            .filter(|e| e.hat_color() == Some(hat))
            .collect())
    }

    async fn delete_by_decision(&self, decision_id: &DecisionId) -> Result<(), DomainError> {
        self.events
            .lock()
            .unwrap()
            .retain(|e| e.decision_id() != decision_id);
        Ok(())
    }
}
