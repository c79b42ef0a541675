//! Request/response shapes for the decision endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{Decision, DecisionOption, DecisionStatus};
use crate::domain::events::{StageEvent, StageResponses};
use crate::domain::foundation::Timestamp;
use crate::domain::hats::HatColor;
use crate::domain::synthesis::{SummaryOutcome, SynthesisOutput};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct CreateDecisionRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<OptionInput>,
}

#[derive(Debug, Deserialize)]
pub struct OptionInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDecisionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of the saveResponses endpoint; the `StageResponses` wire format
/// (`questions` + `additionalThoughts`).
pub type SaveResponsesRequest = StageResponses;

#[derive(Debug, Deserialize)]
pub struct EventsQueryParams {
    /// Optional hat filter (`?hat=blue`).
    #[serde(default)]
    pub hat: Option<HatColor>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: DecisionStatus,
    pub current_hat: Option<HatColor>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Decision> for DecisionResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            id: decision.id().to_string(),
            title: decision.title().to_string(),
            description: decision.description().to_string(),
            status: decision.status(),
            current_hat: decision.current_hat(),
            created_at: *decision.created_at(),
            updated_at: *decision.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

impl From<&DecisionOption> for OptionResponse {
    fn from(option: &DecisionOption) -> Self {
        Self {
            id: option.id().to_string(),
            title: option.title().to_string(),
            description: option.description().map(str::to_string),
            position: option.position(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionDetailResponse {
    pub decision: DecisionResponse,
    pub options: Vec<OptionResponse>,
}

#[derive(Debug, Serialize)]
pub struct DecisionListResponse {
    pub decisions: Vec<DecisionResponse>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub hat_color: Option<HatColor>,
    pub event_type: String,
    pub content: serde_json::Value,
    pub ai_response: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

impl From<&StageEvent> for EventResponse {
    fn from(event: &StageEvent) -> Self {
        Self {
            id: event.id().to_string(),
            hat_color: event.hat_color(),
            event_type: event.event_type().to_string(),
            content: serde_json::to_value(event.content()).unwrap_or(serde_json::Value::Null),
            ai_response: event.ai_response().map(str::to_string),
            metadata: event.metadata().cloned(),
            created_at: *event.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// Result of an advance or skip.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub decision: DecisionResponse,
    /// True when the action left the sequence and ran completion.
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
}

/// Wire shape of the completion outcome: either the synthesis object or the
/// original no-answers sentinel (`{"noAnswers": true, "message": ...}`).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Synthesis(SynthesisOutput),
    NoAnswers {
        #[serde(rename = "noAnswers")]
        no_answers: bool,
        message: String,
    },
}

impl From<SummaryOutcome> for SummaryResponse {
    fn from(outcome: SummaryOutcome) -> Self {
        match outcome {
            SummaryOutcome::Synthesis { synthesis } => SummaryResponse::Synthesis(synthesis),
            SummaryOutcome::NoAnswers { message } => SummaryResponse::NoAnswers {
                no_answers: true,
                message,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DecisionId, UserId};

    #[test]
    fn no_answers_sentinel_serializes_with_original_keys() {
        let response: SummaryResponse = SummaryOutcome::no_answers().into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json.get("noAnswers").unwrap(), &serde_json::json!(true));
        assert!(json.get("message").is_some());
    }

    #[test]
    fn synthesis_outcome_serializes_as_plain_object() {
        let response: SummaryResponse = SummaryOutcome::Synthesis {
            synthesis: SynthesisOutput {
                recommendation: "Go".to_string(),
                ..Default::default()
            },
        }
        .into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json.get("recommendation").unwrap(), "Go");
        assert!(json.get("noAnswers").is_none());
    }

    #[test]
    fn decision_response_carries_process_state() {
        let decision = Decision::new(
            DecisionId::new(),
            UserId::new("user-1").unwrap(),
            "Change job".to_string(),
            "desc".to_string(),
        )
        .unwrap();

        let response = DecisionResponse::from(&decision);
        assert_eq!(response.status, DecisionStatus::Draft);
        assert_eq!(response.current_hat, None);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json.get("status").unwrap(), "draft");
        assert_eq!(json.get("current_hat").unwrap(), &serde_json::Value::Null);
    }

    #[test]
    fn event_response_embeds_content_payload() {
        let event = StageEvent::user_input(
            DecisionId::new(),
            HatColor::Blue,
            StageResponses::new(vec![], "a note"),
        );
        let response = EventResponse::from(&event);
        assert_eq!(response.event_type, "user_input");
        assert_eq!(
            response.content.get("additionalThoughts").unwrap(),
            "a note"
        );
    }
}
