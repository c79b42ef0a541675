//! ListDecisionsHandler - a user's decisions, most recently updated first.

use std::fmt;
use std::sync::Arc;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::DecisionRepository;

/// Query for the caller's decisions.
#[derive(Debug, Clone)]
pub struct ListDecisionsQuery {
    pub user_id: UserId,
}

/// Error type for the list query.
#[derive(Debug, Clone)]
pub enum ListDecisionsError {
    Domain(DomainError),
}

impl fmt::Display for ListDecisionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListDecisionsError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ListDecisionsError {}

impl From<DomainError> for ListDecisionsError {
    fn from(err: DomainError) -> Self {
        ListDecisionsError::Domain(err)
    }
}

/// Handler for the list query.
pub struct ListDecisionsHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl ListDecisionsHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListDecisionsQuery,
    ) -> Result<Vec<Decision>, ListDecisionsError> {
        Ok(self.repository.find_by_owner(&query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDecisionRepository;
    use crate::domain::foundation::DecisionId;

    #[tokio::test]
    async fn lists_only_the_callers_decisions() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let me = UserId::new("user-1").unwrap();
        let someone_else = UserId::new("user-2").unwrap();

        for (owner, title) in [(&me, "Mine"), (&someone_else, "Theirs")] {
            let decision = Decision::new(
                DecisionId::new(),
                owner.clone(),
                title.to_string(),
                "desc".to_string(),
            )
            .unwrap();
            repo.save(&decision, &[]).await.unwrap();
        }

        let handler = ListDecisionsHandler::new(repo);
        let decisions = handler
            .handle(ListDecisionsQuery { user_id: me })
            .await
            .unwrap();

        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].title(), "Mine");
    }
}
