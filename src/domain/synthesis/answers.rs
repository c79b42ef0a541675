//! Grouping of user answers by stage for the synthesis collaborator.

use crate::domain::events::{EventContent, StageEvent};
use crate::domain::hats::{HatColor, HatSequence};
use serde::{Deserialize, Serialize};

/// Label under which free-form stage notes are flattened into the answer
/// list handed to the synthesis collaborator.
const ADDITIONAL_THOUGHTS_LABEL: &str = "Additional thoughts";

/// One question/answer pair as the synthesis collaborator sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAnswer {
    pub question: String,
    pub answer: String,
}

/// All answers captured for one hat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatAnswers {
    pub hat: HatColor,
    pub answers: Vec<StageAnswer>,
}

/// User answers grouped by hat, in process order.
///
/// Built from the decision's `user_input` events: answered question/answer
/// pairs are flattened per hat, and non-empty additional thoughts become one
/// more answer under a fixed label. Hats with nothing real are omitted, so
/// an empty grouping means the synthesis gate should have refused already.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnswersByHat {
    groups: Vec<HatAnswers>,
}

impl AnswersByHat {
    /// Groups the user input found in `events` by hat, in process order.
    ///
    /// Events of other types and unanswered questions are ignored.
    pub fn from_events(events: &[StageEvent]) -> Self {
        let mut groups = Vec::new();

        for hat in HatSequence::all() {
            let mut answers = Vec::new();

            for event in events {
                if event.hat_color() != Some(*hat) {
                    continue;
                }
                let responses = match event.content() {
                    EventContent::UserInput(responses) => responses,
                    _ => continue,
                };
                for qa in responses.answered() {
                    answers.push(StageAnswer {
                        question: qa.question.clone(),
                        answer: qa.answer.clone(),
                    });
                }
                let thoughts = responses.additional_thoughts.trim();
                if !thoughts.is_empty() {
                    answers.push(StageAnswer {
                        question: ADDITIONAL_THOUGHTS_LABEL.to_string(),
                        answer: thoughts.to_string(),
                    });
                }
            }

            if !answers.is_empty() {
                groups.push(HatAnswers { hat: *hat, answers });
            }
        }

        Self { groups }
    }

    /// Returns the grouped answers in process order.
    pub fn groups(&self) -> &[HatAnswers] {
        &self.groups
    }

    /// Returns the answers for one hat, if any were captured.
    pub fn for_hat(&self, hat: HatColor) -> Option<&HatAnswers> {
        self.groups.iter().find(|g| g.hat == hat)
    }

    /// Returns true when no stage captured any real input.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of hats that captured real input.
    pub fn hat_count(&self) -> usize {
        self.groups.len()
    }
}
