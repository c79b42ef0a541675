//! Completion procedure shared by advance, skip and generate-summary.
//!
//! Runs when the process leaves the sequence. The real-input gate decides
//! between the synthesis path (engine call, one synthesis event, status
//! flips to completed) and the no-answers sentinel (no writes at all).
//!
//! Write order on the synthesis path: the event append lands BEFORE the
//! status update. The two writes are not one transaction; a crash between
//! them leaves a synthesis event beside an in-progress row, which is the
//! benign direction (the log never claims less than the decision row).

use std::fmt;

use crate::domain::decision::Decision;
use crate::domain::events::{validator, StageEvent};
use crate::domain::foundation::DomainError;
use crate::domain::synthesis::{AnswersByHat, SummaryOutcome};
use crate::ports::{DecisionRepository, EngineError, EventLog, SynthesisEngine};

/// Result of a stage action (advance or skip).
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
    /// The process moved to the next stage.
    Advanced { decision: Decision },
    /// The process left the sequence; `summary` is the completion outcome.
    Finished {
        decision: Decision,
        summary: SummaryOutcome,
    },
}

impl AdvanceOutcome {
    /// Returns the decision as left by the action.
    pub fn decision(&self) -> &Decision {
        match self {
            AdvanceOutcome::Advanced { decision } => decision,
            AdvanceOutcome::Finished { decision, .. } => decision,
        }
    }
}

/// Error type for the completion procedure.
#[derive(Debug, Clone)]
pub enum CompletionError {
    /// Store or domain failure.
    Domain(DomainError),
    /// The synthesis collaborator failed; no synthesis event was written
    /// and the decision is still in progress, so the call is retryable.
    Synthesis(EngineError),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Domain(err) => write!(f, "{}", err),
            CompletionError::Synthesis(err) => write!(f, "Synthesis failed: {}", err),
        }
    }
}

impl std::error::Error for CompletionError {}

impl From<DomainError> for CompletionError {
    fn from(err: DomainError) -> Self {
        CompletionError::Domain(err)
    }
}

/// Runs the completion procedure for a decision whose process left the
/// sequence.
///
/// Idempotent with respect to the at-most-one-synthesis invariant: if a
/// synthesis event already exists it is returned as-is, without a second
/// engine call or append.
pub(super) async fn run_completion(
    decision: &mut Decision,
    repository: &dyn DecisionRepository,
    event_log: &dyn EventLog,
    engine: &dyn SynthesisEngine,
) -> Result<SummaryOutcome, CompletionError> {
    let events = event_log.list(decision.id()).await?;

    if let Some(existing) = events.iter().find_map(|e| e.content().as_synthesis()) {
        tracing::debug!(decision_id = %decision.id(), "Synthesis already recorded; returning it");
        return Ok(SummaryOutcome::Synthesis {
            synthesis: existing.clone(),
        });
    }

    if !validator::has_any_real_input(&events) {
        tracing::info!(
            decision_id = %decision.id(),
            "Process finished without real input; returning no-answers sentinel"
        );
        return Ok(SummaryOutcome::no_answers());
    }

    let options = repository.find_options(decision.id()).await?;
    let answers = AnswersByHat::from_events(&events);

    let synthesis = engine
        .synthesize(decision.title(), decision.description(), &options, &answers)
        .await
        .map_err(|err| {
            tracing::error!(decision_id = %decision.id(), error = %err, "Synthesis collaborator failed");
            CompletionError::Synthesis(err)
        })?;

    let event = StageEvent::synthesis(*decision.id(), synthesis.clone());
    event_log.append(&event).await?;

    decision.complete()?;
    repository.update(decision).await?;

    tracing::info!(decision_id = %decision.id(), "Synthesis recorded; decision completed");
    Ok(SummaryOutcome::Synthesis { synthesis })
}
