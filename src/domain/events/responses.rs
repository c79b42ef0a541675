//! User response payload for a single stage.

use serde::{Deserialize, Serialize};

/// One generated question and the user's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// Position of the question within the stage (0-based).
    pub id: u32,
    /// The question as presented to the user.
    pub question: String,
    /// The user's answer; may be empty if the question was shown but not
    /// answered.
    #[serde(default)]
    pub answer: String,
}

impl QuestionAnswer {
    /// Creates an answered question.
    pub fn new(id: u32, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Creates a question that was presented but left unanswered.
    pub fn unanswered(id: u32, question: impl Into<String>) -> Self {
        Self::new(id, question, "")
    }

    /// Returns true if the answer carries non-whitespace content.
    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// Everything the user entered at one stage.
///
/// The wire format keeps the original `additionalThoughts` key; internally
/// the field follows Rust naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StageResponses {
    /// The stage's questions with whatever answers were given.
    #[serde(default)]
    pub questions: Vec<QuestionAnswer>,
    /// Free-form notes entered alongside the questions.
    #[serde(default)]
    pub additional_thoughts: String,
}

impl StageResponses {
    /// Creates a response set from questions and free-form thoughts.
    pub fn new(questions: Vec<QuestionAnswer>, additional_thoughts: impl Into<String>) -> Self {
        Self {
            questions,
            additional_thoughts: additional_thoughts.into(),
        }
    }

    /// Returns true if any answer or the free-form notes carry
    /// non-whitespace content.
    pub fn has_real_input(&self) -> bool {
        self.questions.iter().any(QuestionAnswer::is_answered)
            || !self.additional_thoughts.trim().is_empty()
    }

    /// Returns the answered question/answer pairs.
    pub fn answered(&self) -> impl Iterator<Item = &QuestionAnswer> {
        self.questions.iter().filter(|q| q.is_answered())
    }
}
