//! Anthropic-backed implementation of the collaborator ports.
//!
//! Both engines ride the same Messages API call: a system prompt fixes the
//! role and output contract, the user message carries the decision context,
//! and the response is parsed as strict JSON (code fences stripped first,
//! since models occasionally wrap output despite instructions).

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::decision::DecisionOption;
use crate::domain::hats::HatColor;
use crate::domain::synthesis::{AnswersByHat, SynthesisOutput};
use crate::ports::{EngineError, QuestionEngine, SynthesisEngine, QUESTIONS_PER_STAGE};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic engine.
#[derive(Debug, Clone)]
pub struct AnthropicEngineConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum tokens to generate per call.
    pub max_tokens: u32,
}

impl AnthropicEngineConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 2048,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the per-call token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic implementation of both collaborator ports.
pub struct AnthropicEngine {
    config: AnthropicEngineConfig,
    client: Client,
}

impl AnthropicEngine {
    /// Creates a new engine with the given configuration.
    pub fn new(config: AnthropicEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// One non-streaming completion; returns the concatenated text blocks.
    async fn complete(&self, system: String, user: String) -> Result<String, EngineError> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: user,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    EngineError::network(format!("Connection failed: {}", e))
                } else {
                    EngineError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => EngineError::AuthenticationFailed,
                429 => EngineError::RateLimited { retry_after_secs: 30 },
                500..=599 => {
                    EngineError::unavailable(format!("Server error {}: {}", status, body))
                }
                _ => EngineError::network(format!("Unexpected status {}: {}", status, body)),
            });
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| EngineError::invalid_response(format!("Malformed response body: {}", e)))?;

        let text: String = body
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();

        if text.is_empty() {
            return Err(EngineError::invalid_response("Response contained no text"));
        }
        Ok(text)
    }
}

#[async_trait]
impl QuestionEngine for AnthropicEngine {
    async fn generate(
        &self,
        decision_title: &str,
        decision_description: &str,
        options: &[DecisionOption],
        hat: HatColor,
    ) -> Result<Vec<String>, EngineError> {
        let system = question_system_prompt(hat);
        let user = question_user_prompt(decision_title, decision_description, options, hat);

        tracing::debug!(hat = %hat, "Requesting stage questions");
        let text = self.complete(system, user).await?;
        parse_questions(&text)
    }
}

#[async_trait]
impl SynthesisEngine for AnthropicEngine {
    async fn synthesize(
        &self,
        decision_title: &str,
        decision_description: &str,
        options: &[DecisionOption],
        answers: &AnswersByHat,
    ) -> Result<SynthesisOutput, EngineError> {
        let system = synthesis_system_prompt();
        let user = synthesis_user_prompt(decision_title, decision_description, options, answers);

        tracing::debug!(hats = answers.hat_count(), "Requesting synthesis");
        let text = self.complete(system, user).await?;
        parse_synthesis(&text)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Prompt building
// ════════════════════════════════════════════════════════════════════════════

fn question_system_prompt(hat: HatColor) -> String {
    format!(
        "You are facilitating a Six Thinking Hats decision session, currently \
         wearing the {name}. Your questions must stay strictly within this \
         hat's mode: {focus}. Respond with a JSON array of exactly \
         {count} question strings and nothing else.",
        name = hat.display_name(),
        focus = hat.focus(),
        count = QUESTIONS_PER_STAGE,
    )
}

fn question_user_prompt(
    title: &str,
    description: &str,
    options: &[DecisionOption],
    hat: HatColor,
) -> String {
    let mut prompt = format!(
        "Decision: {}\nContext: {}\n{}\n",
        title,
        description,
        format_options(options),
    );
    prompt.push_str(&format!(
        "Generate {} {} questions to help the user think through this decision.",
        QUESTIONS_PER_STAGE,
        hat.display_name(),
    ));
    prompt
}

fn synthesis_system_prompt() -> String {
    "You are concluding a Six Thinking Hats decision session. Aggregate the \
     user's answers from all stages into a final recommendation. Respond with \
     one JSON object and nothing else, using the keys: perspectives (array of \
     {hat, summary}, one per stage that has answers below), insights (exactly \
     3 bullet strings), options_analysis (array of {option, pros, cons, \
     score, summary}), recommended_option ({option, reasoning}), next_steps \
     (array of strings), recommendation (string)."
        .to_string()
}

fn synthesis_user_prompt(
    title: &str,
    description: &str,
    options: &[DecisionOption],
    answers: &AnswersByHat,
) -> String {
    let mut prompt = format!(
        "Decision: {}\nContext: {}\n{}\n\nAnswers by stage:\n",
        title,
        description,
        format_options(options),
    );
    for group in answers.groups() {
        prompt.push_str(&format!("\n{} ({}):\n", group.hat.display_name(), group.hat.focus()));
        for answer in &group.answers {
            prompt.push_str(&format!("- Q: {}\n  A: {}\n", answer.question, answer.answer));
        }
    }
    prompt
}

fn format_options(options: &[DecisionOption]) -> String {
    if options.is_empty() {
        return "Options: none listed".to_string();
    }
    let mut s = "Options:".to_string();
    for option in options {
        match option.description() {
            Some(desc) => s.push_str(&format!("\n- {}: {}", option.title(), desc)),
            None => s.push_str(&format!("\n- {}", option.title())),
        }
    }
    s
}

// ════════════════════════════════════════════════════════════════════════════
// Response parsing
// ════════════════════════════════════════════════════════════════════════════

/// Strips a surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_questions(text: &str) -> Result<Vec<String>, EngineError> {
    let questions: Vec<String> = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| EngineError::invalid_response(format!("Expected a JSON array: {}", e)))?;

    if questions.len() < QUESTIONS_PER_STAGE {
        return Err(EngineError::invalid_response(format!(
            "Expected {} questions, got {}",
            QUESTIONS_PER_STAGE,
            questions.len()
        )));
    }
    Ok(questions.into_iter().take(QUESTIONS_PER_STAGE).collect())
}

fn parse_synthesis(text: &str) -> Result<SynthesisOutput, EngineError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| EngineError::invalid_response(format!("Expected a synthesis object: {}", e)))
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
struct MessageParam {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DecisionId;

    fn options() -> Vec<DecisionOption> {
        vec![
            DecisionOption::new(DecisionId::new(), "Stay".to_string(), None, 0).unwrap(),
            DecisionOption::new(
                DecisionId::new(),
                "Go".to_string(),
                Some("Take the new offer".to_string()),
                1,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = AnthropicEngineConfig::new("sk-ant-test")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("http://localhost:8080")
            .with_max_tokens(512);
        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn question_prompt_carries_hat_focus() {
        let system = question_system_prompt(HatColor::Black);
        assert!(system.contains("Black Hat"));
        assert!(system.contains(HatColor::Black.focus()));
    }

    #[test]
    fn user_prompt_lists_options() {
        let prompt = question_user_prompt("Change job", "ctx", &options(), HatColor::White);
        assert!(prompt.contains("- Stay"));
        assert!(prompt.contains("- Go: Take the new offer"));
    }

    #[test]
    fn format_options_handles_empty_list() {
        assert_eq!(format_options(&[]), "Options: none listed");
    }

    #[test]
    fn strip_code_fence_unwraps_json_fence() {
        assert_eq!(strip_code_fence("```json\n[\"a\"]\n```"), "[\"a\"]");
        assert_eq!(strip_code_fence("[\"a\"]"), "[\"a\"]");
    }

    #[test]
    fn parse_questions_accepts_exact_count() {
        let parsed = parse_questions(r#"["q1", "q2", "q3"]"#).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn parse_questions_truncates_extras() {
        let parsed = parse_questions(r#"["q1", "q2", "q3", "q4"]"#).unwrap();
        assert_eq!(parsed, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn parse_questions_rejects_short_or_malformed_output() {
        assert!(matches!(
            parse_questions(r#"["q1"]"#),
            Err(EngineError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_questions("not json"),
            Err(EngineError::InvalidResponse(_))
        ));
    }

    #[test]
    fn parse_synthesis_reads_fenced_object() {
        let text = "```json\n{\"recommendation\": \"Go\"}\n```";
        let output = parse_synthesis(text).unwrap();
        assert_eq!(output.recommendation, "Go");
    }

    #[test]
    fn synthesis_prompt_groups_answers_by_stage() {
        let event = crate::domain::events::StageEvent::user_input(
            DecisionId::new(),
            HatColor::Red,
            crate::domain::events::StageResponses::new(
                vec![crate::domain::events::QuestionAnswer::new(0, "Gut feel?", "Uneasy")],
                "",
            ),
        );
        let answers = AnswersByHat::from_events(std::slice::from_ref(&event));
        let prompt = synthesis_user_prompt("Change job", "ctx", &options(), &answers);
        assert!(prompt.contains("Red Hat"));
        assert!(prompt.contains("A: Uneasy"));
    }
}
