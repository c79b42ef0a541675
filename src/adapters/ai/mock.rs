//! Scripted engine for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::decision::DecisionOption;
use crate::domain::hats::HatColor;
use crate::domain::synthesis::{AnswersByHat, SynthesisOutput};
use crate::ports::{EngineError, QuestionEngine, SynthesisEngine, QUESTIONS_PER_STAGE};

/// Scripted implementation of both collaborator ports.
///
/// Returns canned questions and a canned synthesis, optionally failing
/// either call, and counts invocations so tests can assert "invoked exactly
/// once" and "never invoked".
pub struct MockEngine {
    questions: Vec<String>,
    fail_questions: bool,
    synthesis: SynthesisOutput,
    fail_synthesis: bool,
    generate_calls: AtomicU32,
    synthesize_calls: AtomicU32,
    last_answers: Mutex<Option<AnswersByHat>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Engine that succeeds with generic canned output.
    pub fn new() -> Self {
        Self {
            questions: (1..=QUESTIONS_PER_STAGE)
                .map(|i| format!("Canned question {}", i))
                .collect(),
            fail_questions: false,
            synthesis: SynthesisOutput {
                insights: vec![
                    "First insight".to_string(),
                    "Second insight".to_string(),
                    "Third insight".to_string(),
                ],
                recommendation: "Canned recommendation".to_string(),
                ..Default::default()
            },
            fail_synthesis: false,
            generate_calls: AtomicU32::new(0),
            synthesize_calls: AtomicU32::new(0),
            last_answers: Mutex::new(None),
        }
    }

    /// Overrides the canned questions.
    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    /// Overrides the canned synthesis.
    pub fn with_synthesis(mut self, synthesis: SynthesisOutput) -> Self {
        self.synthesis = synthesis;
        self
    }

    /// Makes question generation fail.
    pub fn failing_questions(mut self) -> Self {
        self.fail_questions = true;
        self
    }

    /// Makes synthesis fail.
    pub fn failing_synthesis(mut self) -> Self {
        self.fail_synthesis = true;
        self
    }

    /// Number of question-generation calls observed.
    pub fn generate_calls(&self) -> u32 {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of synthesis calls observed.
    pub fn synthesize_calls(&self) -> u32 {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    /// The answer grouping handed to the last synthesis call.
    pub fn last_answers(&self) -> Option<AnswersByHat> {
        self.last_answers.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionEngine for MockEngine {
    async fn generate(
        &self,
        _decision_title: &str,
        _decision_description: &str,
        _options: &[DecisionOption],
        _hat: HatColor,
    ) -> Result<Vec<String>, EngineError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_questions {
            return Err(EngineError::unavailable("Scripted question failure"));
        }
        Ok(self.questions.clone())
    }
}

#[async_trait]
impl SynthesisEngine for MockEngine {
    async fn synthesize(
        &self,
        _decision_title: &str,
        _decision_description: &str,
        _options: &[DecisionOption],
        answers: &AnswersByHat,
    ) -> Result<SynthesisOutput, EngineError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_answers.lock().unwrap() = Some(answers.clone());
        if self.fail_synthesis {
            return Err(EngineError::unavailable("Scripted synthesis failure"));
        }
        Ok(self.synthesis.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_question_calls() {
        let engine = MockEngine::new();
        engine
            .generate("t", "d", &[], HatColor::Blue)
            .await
            .unwrap();
        engine
            .generate("t", "d", &[], HatColor::White)
            .await
            .unwrap();
        assert_eq!(engine.generate_calls(), 2);
        assert_eq!(engine.synthesize_calls(), 0);
    }

    #[tokio::test]
    async fn failing_questions_still_counts() {
        let engine = MockEngine::new().failing_questions();
        let result = engine.generate("t", "d", &[], HatColor::Blue).await;
        assert!(result.is_err());
        assert_eq!(engine.generate_calls(), 1);
    }

    #[tokio::test]
    async fn records_answers_handed_to_synthesis() {
        let engine = MockEngine::new();
        let answers = AnswersByHat::default();
        engine.synthesize("t", "d", &[], &answers).await.unwrap();
        assert_eq!(engine.synthesize_calls(), 1);
        assert_eq!(engine.last_answers().unwrap(), answers);
    }
}
