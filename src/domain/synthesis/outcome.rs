//! Outcome of the completion procedure.

use crate::domain::synthesis::SynthesisOutput;
use serde::{Deserialize, Serialize};

/// What the completion procedure handed back to the caller.
///
/// `NoAnswers` is the sentinel (non-error) outcome for a process that ran
/// out of stages without capturing any real input: no synthesis is
/// generated, nothing is written, and the decision is NOT marked completed,
/// so the user can go back and actually answer something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Synthesis { synthesis: SynthesisOutput },
    NoAnswers { message: String },
}

impl SummaryOutcome {
    /// Builds the sentinel with its standard explanation.
    pub fn no_answers() -> Self {
        SummaryOutcome::NoAnswers {
            message: "No answers were recorded during this process, so there is nothing \
                      to summarize. Revisit the stages and answer at least one question \
                      to generate a recommendation."
                .to_string(),
        }
    }

    /// Returns the synthesis if one was generated.
    pub fn synthesis(&self) -> Option<&SynthesisOutput> {
        match self {
            SummaryOutcome::Synthesis { synthesis } => Some(synthesis),
            SummaryOutcome::NoAnswers { .. } => None,
        }
    }

    /// Returns true for the no-answers sentinel.
    pub fn is_no_answers(&self) -> bool {
        matches!(self, SummaryOutcome::NoAnswers { .. })
    }
}
