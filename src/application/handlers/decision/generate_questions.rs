//! GenerateQuestionsHandler - stage questions from the question collaborator.
//!
//! Collaborator failures degrade to an empty list rather than an error: a
//! stage with no generated questions is still skippable and answerable via
//! free-form thoughts, so the process never blocks on the engine.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::domain::hats::HatColor;
use crate::ports::{DecisionRepository, QuestionEngine};

/// Query for one stage's questions.
#[derive(Debug, Clone)]
pub struct GenerateQuestionsQuery {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub hat: HatColor,
}

/// Error type for question generation.
///
/// Engine failures are NOT represented here; they degrade to `Ok(vec![])`.
#[derive(Debug, Clone)]
pub enum GenerateQuestionsError {
    DecisionNotFound(DecisionId),
    Domain(DomainError),
}

impl fmt::Display for GenerateQuestionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateQuestionsError::DecisionNotFound(id) => {
                write!(f, "Decision not found: {}", id)
            }
            GenerateQuestionsError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GenerateQuestionsError {}

impl From<DomainError> for GenerateQuestionsError {
    fn from(err: DomainError) -> Self {
        GenerateQuestionsError::Domain(err)
    }
}

/// Handler for question generation.
pub struct GenerateQuestionsHandler {
    repository: Arc<dyn DecisionRepository>,
    question_engine: Arc<dyn QuestionEngine>,
}

impl GenerateQuestionsHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        question_engine: Arc<dyn QuestionEngine>,
    ) -> Self {
        Self {
            repository,
            question_engine,
        }
    }

    pub async fn handle(
        &self,
        query: GenerateQuestionsQuery,
    ) -> Result<Vec<String>, GenerateQuestionsError> {
        let decision = self
            .repository
            .find_by_id(&query.decision_id)
            .await?
            .ok_or(GenerateQuestionsError::DecisionNotFound(query.decision_id))?;

        decision.authorize(&query.user_id)?;

        let options = self.repository.find_options(&query.decision_id).await?;

        match self
            .question_engine
            .generate(
                decision.title(),
                decision.description(),
                &options,
                query.hat,
            )
            .await
        {
            Ok(questions) => Ok(questions),
            Err(err) => {
                tracing::warn!(
                    decision_id = %query.decision_id,
                    hat = %query.hat,
                    error = %err,
                    "Question generation failed; returning empty list"
                );
                Ok(Vec::new())
            }
        }
    }
}
