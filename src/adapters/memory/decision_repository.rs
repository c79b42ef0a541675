//! In-memory implementation of DecisionRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::decision::{Decision, DecisionOption};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, UserId};
use crate::ports::DecisionRepository;

/// HashMap-backed DecisionRepository for tests and local runs.
#[derive(Default)]
pub struct InMemoryDecisionRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    decisions: HashMap<DecisionId, Decision>,
    options: HashMap<DecisionId, Vec<DecisionOption>>,
}

impl InMemoryDecisionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decisions (test helper).
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().decisions.len()
    }

    /// Returns true if no decisions are stored (test helper).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn save(
        &self,
        decision: &Decision,
        options: &[DecisionOption],
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.decisions.insert(*decision.id(), decision.clone());
        state.options.insert(*decision.id(), options.to_vec());
        Ok(())
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        match state.decisions.get_mut(decision.id()) {
            Some(stored) => {
                *stored = decision.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                format!("Decision not found: {}", decision.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        Ok(self.state.lock().unwrap().decisions.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Decision>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut decisions: Vec<Decision> = state
            .decisions
            .values()
            .filter(|d| d.owner_id() == owner_id)
            .cloned()
            .collect();
        decisions.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(decisions)
    }

    async fn find_options(&self, id: &DecisionId) -> Result<Vec<DecisionOption>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut options = state.options.get(id).cloned().unwrap_or_default();
        options.sort_by_key(|o| o.position());
        Ok(options)
    }

    async fn delete(&self, id: &DecisionId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.decisions.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                format!("Decision not found: {}", id),
            ));
        }
        state.options.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn decision_with_options(n: usize) -> (Decision, Vec<DecisionOption>) {
        let decision = Decision::new(
            DecisionId::new(),
            owner(),
            "Change job".to_string(),
            "Backend vs platform".to_string(),
        )
        .unwrap();
        let options = (0..n)
            .map(|i| {
                DecisionOption::new(*decision.id(), format!("Option {}", i), None, i as i32)
                    .unwrap()
            })
            .collect();
        (decision, options)
    }

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let repo = InMemoryDecisionRepository::new();
        let (decision, options) = decision_with_options(2);

        repo.save(&decision, &options).await.unwrap();

        let found = repo.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(&found, &decision);
    }

    #[tokio::test]
    async fn options_preserve_count_and_order() {
        let repo = InMemoryDecisionRepository::new();
        let (decision, options) = decision_with_options(4);

        repo.save(&decision, &options).await.unwrap();

        let found = repo.find_options(decision.id()).await.unwrap();
        assert_eq!(found.len(), 4);
        for (i, option) in found.iter().enumerate() {
            assert_eq!(option.position(), i as i32);
            assert_eq!(option.title(), format!("Option {}", i));
        }
    }

    #[tokio::test]
    async fn update_requires_existing_decision() {
        let repo = InMemoryDecisionRepository::new();
        let (decision, _) = decision_with_options(0);

        let err = repo.update(&decision).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }

    #[tokio::test]
    async fn delete_removes_decision_and_options() {
        let repo = InMemoryDecisionRepository::new();
        let (decision, options) = decision_with_options(2);
        repo.save(&decision, &options).await.unwrap();

        repo.delete(decision.id()).await.unwrap();

        assert!(repo.find_by_id(decision.id()).await.unwrap().is_none());
        assert!(repo.find_options(decision.id()).await.unwrap().is_empty());
        let err = repo.delete(decision.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }

    #[tokio::test]
    async fn find_by_owner_filters_and_sorts() {
        let repo = InMemoryDecisionRepository::new();
        let (mine, _) = decision_with_options(0);
        repo.save(&mine, &[]).await.unwrap();

        let other = Decision::new(
            DecisionId::new(),
            UserId::new("user-2").unwrap(),
            "Move city".to_string(),
            "North or south".to_string(),
        )
        .unwrap();
        repo.save(&other, &[]).await.unwrap();

        let found = repo.find_by_owner(&owner()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), mine.id());
    }
}
