//! CreateDecisionHandler - creates a decision with its options.

use std::fmt;
use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionOption};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::DecisionRepository;

/// One option as supplied at creation time.
#[derive(Debug, Clone)]
pub struct NewOptionInput {
    pub title: String,
    pub description: Option<String>,
}

/// Command to create a decision.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    /// The caller, who becomes the owner.
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    /// Candidate answers, in presentation order.
    pub options: Vec<NewOptionInput>,
}

/// Result of creating a decision.
#[derive(Debug, Clone)]
pub struct CreateDecisionResult {
    pub decision: Decision,
    pub options: Vec<DecisionOption>,
}

/// Error type for decision creation.
#[derive(Debug, Clone)]
pub enum CreateDecisionError {
    /// Validation or store failure.
    Domain(DomainError),
}

impl fmt::Display for CreateDecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateDecisionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateDecisionError {}

impl From<DomainError> for CreateDecisionError {
    fn from(err: DomainError) -> Self {
        CreateDecisionError::Domain(err)
    }
}

/// Handler for decision creation.
pub struct CreateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl CreateDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateDecisionCommand,
    ) -> Result<CreateDecisionResult, CreateDecisionError> {
        let decision = Decision::new(
            DecisionId::new(),
            cmd.owner_id,
            cmd.title,
            cmd.description,
        )?;

        let options: Vec<DecisionOption> = cmd
            .options
            .into_iter()
            .enumerate()
            .map(|(position, input)| {
                DecisionOption::new(
                    *decision.id(),
                    input.title,
                    input.description,
                    position as i32,
                )
            })
            .collect::<Result<_, _>>()?;

        self.repository.save(&decision, &options).await?;

        tracing::info!(decision_id = %decision.id(), options = options.len(), "Decision created");
        Ok(CreateDecisionResult { decision, options })
    }
}
