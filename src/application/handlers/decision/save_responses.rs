//! SaveResponsesHandler - the "next" action of the process.
//!
//! Records the user's answers for the stage currently being worked, then
//! advances the process. Answering the last stage triggers the completion
//! procedure.

use std::fmt;
use std::sync::Arc;

use crate::application::handlers::decision::completion::{
    run_completion, AdvanceOutcome, CompletionError,
};
use crate::domain::events::{StageEvent, StageResponses};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::domain::hats::HatSequence;
use crate::ports::{DecisionRepository, EngineError, EventLog, SynthesisEngine};

/// Command to record stage responses and advance.
#[derive(Debug, Clone)]
pub struct SaveResponsesCommand {
    /// The decision being worked.
    pub decision_id: DecisionId,
    /// The caller; must be the decision owner.
    pub user_id: UserId,
    /// Everything the user entered at the current stage.
    pub responses: StageResponses,
}

/// Error type for the advance action.
#[derive(Debug, Clone)]
pub enum SaveResponsesError {
    /// Decision not found.
    DecisionNotFound(DecisionId),
    /// Domain error (authorization, already completed, store failure).
    Domain(DomainError),
    /// The synthesis collaborator failed during completion. The user's
    /// responses ARE recorded; only the summary is missing and retryable.
    Synthesis(EngineError),
}

impl fmt::Display for SaveResponsesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveResponsesError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            SaveResponsesError::Domain(err) => write!(f, "{}", err),
            SaveResponsesError::Synthesis(err) => write!(f, "Synthesis failed: {}", err),
        }
    }
}

impl std::error::Error for SaveResponsesError {}

impl From<DomainError> for SaveResponsesError {
    fn from(err: DomainError) -> Self {
        SaveResponsesError::Domain(err)
    }
}

impl From<CompletionError> for SaveResponsesError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Domain(err) => SaveResponsesError::Domain(err),
            CompletionError::Synthesis(err) => SaveResponsesError::Synthesis(err),
        }
    }
}

/// Handler for the advance action.
pub struct SaveResponsesHandler {
    repository: Arc<dyn DecisionRepository>,
    event_log: Arc<dyn EventLog>,
    synthesis_engine: Arc<dyn SynthesisEngine>,
}

impl SaveResponsesHandler {
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

    pub async fn handle(
        &self,
        cmd: SaveResponsesCommand,
    ) -> Result<AdvanceOutcome, SaveResponsesError> {
        let mut decision = self
            .repository
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(SaveResponsesError::DecisionNotFound(cmd.decision_id))?;

        decision.authorize(&cmd.user_id)?;

        // A not-yet-started decision works the first stage. `begin` also
        // rejects completed decisions before anything is written.
        let hat = decision.working_hat();
        decision.begin()?;

        let event = StageEvent::user_input(cmd.decision_id, hat, cmd.responses);
        self.event_log.append(&event).await?;

        match HatSequence::next(Some(hat)) {
            Some(next_hat) => {
                decision.move_to_hat(next_hat)?;
                self.repository.update(&decision).await?;
                tracing::info!(
                    decision_id = %cmd.decision_id,
                    from = %hat,
                    to = %next_hat,
                    "Responses recorded; advanced to next stage"
                );
                Ok(AdvanceOutcome::Advanced { decision })
            }
            None => {
                // The last stage was just answered. Persist the stage state
                // before completion so a synthesis failure still leaves the
                // decision in progress at the final hat.
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
