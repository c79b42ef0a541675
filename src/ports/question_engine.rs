//! Question collaborator port.

use crate::domain::decision::DecisionOption;
use crate::domain::hats::HatColor;
use crate::ports::EngineError;
use async_trait::async_trait;

/// Number of questions a stage presents to the user.
pub const QUESTIONS_PER_STAGE: usize = 3;

/// Port for the stage-aware question generator.
///
/// Given the decision's framing and the hat being worked, implementations
/// return exactly [`QUESTIONS_PER_STAGE`] questions in that hat's
/// question-framing mode (see `HatColor::focus`). The caller, not the
/// implementation, decides how to degrade on failure.
#[async_trait]
pub trait QuestionEngine: Send + Sync {
    /// Generate the stage's questions.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; callers degrade to an empty list so the process
    /// can still advance via skip.
    async fn generate(
        &self,
        decision_title: &str,
        decision_description: &str,
        options: &[DecisionOption],
        hat: HatColor,
    ) -> Result<Vec<String>, EngineError>;
}
