//! Synthesis collaborator port.

use crate::domain::decision::DecisionOption;
use crate::domain::synthesis::{AnswersByHat, SynthesisOutput};
use crate::ports::EngineError;
use async_trait::async_trait;

/// Port for the cross-stage aggregator producing the final recommendation.
///
/// Invoked exactly once per completed process, and only after the input
/// validator confirmed that at least one stage captured real input. The
/// grouping handed in is already ordered by process stage and stripped of
/// empty answers.
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Produce the structured synthesis.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; the completion procedure propagates it without
    /// writing a synthesis event, leaving the call retryable.
    async fn synthesize(
        &self,
        decision_title: &str,
        decision_description: &str,
        options: &[DecisionOption],
        answers: &AnswersByHat,
    ) -> Result<SynthesisOutput, EngineError>;
}
