//! GenerateSummaryHandler - on-demand completion.
//!
//! Lets the UI (re)request the final summary for a decision whose stages are
//! exhausted: the normal case is a retry after a synthesis failure during
//! advance/skip, and re-reading an already completed decision's summary.

use std::fmt;
use std::sync::Arc;

use crate::application::handlers::decision::completion::{run_completion, CompletionError};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, UserId};
use crate::domain::hats::HatSequence;
use crate::domain::synthesis::SummaryOutcome;
use crate::ports::{DecisionRepository, EngineError, EventLog, SynthesisEngine};

/// Command to produce (or re-read) the decision summary.
#[derive(Debug, Clone)]
pub struct GenerateSummaryCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// Error type for summary generation.
#[derive(Debug, Clone)]
pub enum GenerateSummaryError {
    DecisionNotFound(DecisionId),
    /// The process is still mid-sequence; stages remain to be worked.
    StagesRemaining(DecisionId),
    Domain(DomainError),
    /// The synthesis collaborator failed; retryable.
    Synthesis(EngineError),
}

impl fmt::Display for GenerateSummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateSummaryError::DecisionNotFound(id) => write!(f, "Decision not found: {}", id),
            GenerateSummaryError::StagesRemaining(id) => {
                write!(f, "Decision {} still has stages to work through", id)
            }
            GenerateSummaryError::Domain(err) => write!(f, "{}", err),
            GenerateSummaryError::Synthesis(err) => write!(f, "Synthesis failed: {}", err),
        }
    }
}

impl std::error::Error for GenerateSummaryError {}

impl From<DomainError> for GenerateSummaryError {
    fn from(err: DomainError) -> Self {
        GenerateSummaryError::Domain(err)
    }
}

impl From<CompletionError> for GenerateSummaryError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Domain(err) => GenerateSummaryError::Domain(err),
            CompletionError::Synthesis(err) => GenerateSummaryError::Synthesis(err),
        }
    }
}

/// Handler for summary generation.
pub struct GenerateSummaryHandler {
    repository: Arc<dyn DecisionRepository>,
    event_log: Arc<dyn EventLog>,
    synthesis_engine: Arc<dyn SynthesisEngine>,
}

impl GenerateSummaryHandler {
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
        cmd: GenerateSummaryCommand,
    ) -> Result<SummaryOutcome, GenerateSummaryError> {
        let mut decision = self
            .repository
            .find_by_id(&cmd.decision_id)
            .await?
            .ok_or(GenerateSummaryError::DecisionNotFound(cmd.decision_id))?;

        decision.authorize(&cmd.user_id)?;

        // `is_complete` reads a never-started decision (hat None) as
        // exhausted too; that path falls through to the no-answers sentinel,
        // which is the correct answer for it.
        if !HatSequence::is_complete(decision.current_hat()) {
            return Err(GenerateSummaryError::StagesRemaining(cmd.decision_id));
        }

        // A decision can only be Completed with its synthesis already in
        // the log, which run_completion returns without a second engine
        // call. Everything else goes through the gate.
        if decision.status().is_terminal() {
            let events = self.event_log.list(&cmd.decision_id).await?;
            if let Some(existing) = events.iter().find_map(|e| e.content().as_synthesis()) {
                return Ok(SummaryOutcome::Synthesis {
                    synthesis: existing.clone(),
                });
            }
            return Err(GenerateSummaryError::Domain(DomainError::new(
                ErrorCode::InternalError,
                format!(
                    "Decision {} is completed but has no synthesis event",
                    cmd.decision_id
                ),
            )));
        }

        let summary = run_completion(
            &mut decision,
            self.repository.as_ref(),
            self.event_log.as_ref(),
            self.synthesis_engine.as_ref(),
        )
        .await?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockEngine;
    use crate::adapters::memory::{InMemoryDecisionRepository, InMemoryEventLog};
    use crate::application::handlers::decision::{SaveResponsesCommand, SaveResponsesHandler};
    use crate::domain::decision::{Decision, DecisionStatus};
    use crate::domain::events::{EventType, QuestionAnswer, StageResponses};

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
        repo.save(&decision, &[]).await.unwrap();
        decision
    }

    fn summary_handler(
        repo: Arc<InMemoryDecisionRepository>,
        log: Arc<InMemoryEventLog>,
        engine: Arc<MockEngine>,
    ) -> GenerateSummaryHandler {
        GenerateSummaryHandler::new(repo, log, engine)
    }

    async fn walk_to_green_with_answers(
        repo: Arc<InMemoryDecisionRepository>,
        log: Arc<InMemoryEventLog>,
        engine: Arc<MockEngine>,
        decision: &Decision,
    ) {
        // Five advances land the decision on the final stage.
        let advance = SaveResponsesHandler::new(repo, log, engine);
        for i in 0..5 {
            advance
                .handle(SaveResponsesCommand {
                    decision_id: *decision.id(),
                    user_id: owner(),
                    responses: StageResponses::new(
                        vec![QuestionAnswer::new(0, format!("Q{}", i), format!("A{}", i))],
                        "",
                    ),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn refuses_mid_sequence_decision() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let engine = Arc::new(MockEngine::new());
        let decision = seeded(&repo).await;

        // One answered stage: decision sits at White, mid-sequence.
        let advance = SaveResponsesHandler::new(repo.clone(), log.clone(), engine.clone());
        advance
            .handle(SaveResponsesCommand {
                decision_id: *decision.id(),
                user_id: owner(),
                responses: StageResponses::new(vec![], "note"),
            })
            .await
            .unwrap();

        let handler = summary_handler(repo, log, engine.clone());
        let result = handler
            .handle(GenerateSummaryCommand {
                decision_id: *decision.id(),
                user_id: owner(),
            })
            .await;

        assert!(matches!(
            result,
            Err(GenerateSummaryError::StagesRemaining(_))
        ));
        assert_eq!(engine.synthesize_calls(), 0);
    }

    #[tokio::test]
    async fn retry_after_synthesis_failure_completes_the_decision() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let failing = Arc::new(MockEngine::new().failing_synthesis());
        let decision = seeded(&repo).await;

        walk_to_green_with_answers(repo.clone(), log.clone(), failing.clone(), &decision).await;

        // The final advance fails at the synthesis step.
        let advance = SaveResponsesHandler::new(repo.clone(), log.clone(), failing.clone());
        let result = advance
            .handle(SaveResponsesCommand {
                decision_id: *decision.id(),
                user_id: owner(),
                responses: StageResponses::new(vec![], "last thoughts"),
            })
            .await;
        assert!(result.is_err());

        // Retrying the summary with a healthy engine finishes the job.
        let healthy = Arc::new(MockEngine::new());
        let handler = summary_handler(repo.clone(), log.clone(), healthy.clone());
        let outcome = handler
            .handle(GenerateSummaryCommand {
                decision_id: *decision.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert!(!outcome.is_no_answers());
        assert_eq!(healthy.synthesize_calls(), 1);

        let stored = repo.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), DecisionStatus::Completed);

        let events = log.list(decision.id()).await.unwrap();
        let synthesis_count = events
            .iter()
            .filter(|e| e.event_type() == EventType::Synthesis)
            .count();
        assert_eq!(synthesis_count, 1);
    }

    #[tokio::test]
    async fn rereading_a_completed_decision_does_not_call_the_engine_again() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let engine = Arc::new(MockEngine::new());
        let decision = seeded(&repo).await;

        walk_to_green_with_answers(repo.clone(), log.clone(), engine.clone(), &decision).await;

        let advance = SaveResponsesHandler::new(repo.clone(), log.clone(), engine.clone());
        advance
            .handle(SaveResponsesCommand {
                decision_id: *decision.id(),
                user_id: owner(),
                responses: StageResponses::new(vec![], "closing thoughts"),
            })
            .await
            .unwrap();
        assert_eq!(engine.synthesize_calls(), 1);

        let handler = summary_handler(repo, log, engine.clone());
        let outcome = handler
            .handle(GenerateSummaryCommand {
                decision_id: *decision.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert!(!outcome.is_no_answers());
        // Still exactly one engine call: the stored synthesis was returned.
        assert_eq!(engine.synthesize_calls(), 1);
    }

    #[tokio::test]
    async fn never_started_decision_gets_the_sentinel() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let engine = Arc::new(MockEngine::new());
        let decision = seeded(&repo).await;

        let handler = summary_handler(repo.clone(), log, engine.clone());
        let outcome = handler
            .handle(GenerateSummaryCommand {
                decision_id: *decision.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert!(outcome.is_no_answers());
        assert_eq!(engine.synthesize_calls(), 0);

        // The sentinel path writes nothing: still a draft.
        let stored = repo.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), DecisionStatus::Draft);
    }

    #[tokio::test]
    async fn fails_for_unknown_decision() {
        let repo = Arc::new(InMemoryDecisionRepository::new());
        let log = Arc::new(InMemoryEventLog::new());
        let engine = Arc::new(MockEngine::new());

        let handler = summary_handler(repo, log, engine);
        let result = handler
            .handle(GenerateSummaryCommand {
                decision_id: DecisionId::new(),
                user_id: owner(),
            })
            .await;

        assert!(matches!(
            result,
            Err(GenerateSummaryError::DecisionNotFound(_))
        ));
    }
}
