//! SkipStageHandler - the "skip" action of the process.
//!
//! Moves past the stage currently being worked WITHOUT writing any event.
//! Skipping the last stage triggers the completion procedure, exactly like
//! answering it would.

use std::fmt;
use std::sync::Arc;

use crate::application::handlers::decision::completion::{
    run_completion, AdvanceOutcome, CompletionError,
};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::domain::hats::HatSequence;
use crate::ports::{DecisionRepository, EngineError, EventLog, SynthesisEngine};

/// Command to skip the current stage.
#[derive(Debug, Clone)]
pub struct SkipStageCommand {
    /// The decision being worked.
    pub decision_id: DecisionId,
    /// The caller; must be the decision owner.
    pub user_id: UserId,
}

/// Error type for the skip action.
#[derive(Debug, Clone)]
pub enum SkipStageError {
    /// Decision not found.
    DecisionNotFound(DecisionId),
    /// Domain error (authorization, already completed, store failure).
    Domain(DomainError),
    /// The synthesis collaborator failed during completion.
    Synthesis(EngineError),
}

impl fmt::Display for SkipStageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipStageError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            SkipStageError::Domain(err) => write!(f, "{}", err),
            SkipStageError::Synthesis(err) => write!(f, "Synthesis failed: {}", err),
        }
    }
}

impl std::error::Error for SkipStageError {}

impl From<DomainError> for SkipStageError {
    fn from(err: DomainError) -> Self {
        SkipStageError::Domain(err)
    }
}

impl From<CompletionError> for SkipStageError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Domain(err) => SkipStageError::Domain(err),
            CompletionError::Synthesis(err) => SkipStageError::Synthesis(err),
        }
    }
}

/// Handler for the skip action.
pub struct SkipStageHandler {
    repository: Arc<dyn DecisionRepository>,
    event_log: Arc<dyn EventLog>,
    synthesis_engine: Arc<dyn SynthesisEngine>,
}

impl SkipStageHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        event_log: Arc<dyn EventLog>,
        synthesis_engine: Arc<dyn SynthesisEngine>,
    ) -> Self {
        Self {
            repository,
            event_log,
            synthesis_engine,
        }
    }

    pub async fn handle(&self, cmd: SkipStageCommand) -> Result<AdvanceOutcome, SkipStageError> {
        let mut decision = self
            .repository
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(SkipStageError::DecisionNotFound(cmd.decision_id))?;

        decision.authorize(&cmd.user_id)?;

        let hat = decision.working_hat();
        decision.begin()?;

        match HatSequence::next(Some(hat)) {
            Some(next_hat) => {
                decision.move_to_hat(next_hat)?;
                self.repository.update(&decision).await?;
                tracing::info!(
                    decision_id = %cmd.decision_id,
                    from = %hat,
                    to = %next_hat,
                    "Stage skipped"
                );
                Ok(AdvanceOutcome::Advanced { decision })
            }
            None => {
                decision.move_to_hat(hat)?;
                self.repository.update(&decision).await?;

                let summary = run_completion(
                    &mut decision,
                    self.repository.as_ref(),
                    self.event_log.as_ref(),
                    self.synthesis_engine.as_ref(),
                )
                .await?;

                Ok(AdvanceOutcome::Finished { decision, summary })
            }
        }
    }
}
