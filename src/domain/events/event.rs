//! StageEvent - one immutable entry in a decision's process log.

use crate::domain::events::StageResponses;
use crate::domain::foundation::{DecisionId, StageEventId, Timestamp};
use crate::domain::hats::HatColor;
use crate::domain::synthesis::SynthesisOutput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminates the three kinds of log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Analysis,
    UserInput,
    Synthesis,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventType::Analysis => "analysis",
            EventType::UserInput => "user_input",
            EventType::Synthesis => "synthesis",
        };
        write!(f, "{}", s)
    }
}

/// Typed event payload.
///
/// One variant per event type, so a `user_input` entry can only ever hold a
/// [`StageResponses`] payload and a `synthesis` entry a [`SynthesisOutput`].
/// The event type is derived from the variant rather than stored beside it;
/// the two can never disagree.
///
/// Untagged: variants are tried in declaration order, and `StageResponses`
/// rejects unknown fields, so object payloads dispatch unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventContent {
    /// User responses for one stage.
    UserInput(StageResponses),
    /// The final cross-stage synthesis.
    Synthesis(SynthesisOutput),
    /// Free-text AI commentary recorded for a stage.
    Analysis(String),
}

impl EventContent {
    /// Returns the event type this payload belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            EventContent::Analysis(_) => EventType::Analysis,
            EventContent::UserInput(_) => EventType::UserInput,
            EventContent::Synthesis(_) => EventType::Synthesis,
        }
    }

    /// Returns the user responses if this is a user_input payload.
    pub fn as_user_input(&self) -> Option<&StageResponses> {
        match self {
            EventContent::UserInput(responses) => Some(responses),
            _ => None,
        }
    }

    /// Returns the synthesis if this is a synthesis payload.
    pub fn as_synthesis(&self) -> Option<&SynthesisOutput> {
        match self {
            EventContent::Synthesis(output) => Some(output),
            _ => None,
        }
    }
}

/// One immutable entry in a decision's process log.
///
/// # Invariants
///
/// - never updated or deleted once appended (deletion happens only as part
///   of deleting the whole decision)
/// - `hat_color` is present for stage-scoped entries (`analysis`,
///   `user_input`) and absent for the cross-stage `synthesis` entry
/// - at most one `synthesis` entry exists per decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    id: StageEventId,
    decision_id: DecisionId,
    hat_color: Option<HatColor>,
    content: EventContent,
    ai_response: Option<String>,
    metadata: Option<serde_json::Value>,
    created_at: Timestamp,
}

impl StageEvent {
    /// Creates a user_input entry for one stage.
    pub fn user_input(
        decision_id: DecisionId,
        hat: HatColor,
        responses: StageResponses,
    ) -> Self {
        Self {
            id: StageEventId::new(),
            decision_id,
            hat_color: Some(hat),
            content: EventContent::UserInput(responses),
            ai_response: None,
            metadata: None,
            created_at: Timestamp::now(),
        }
    }

    /// Creates an analysis entry for one stage.
    pub fn analysis(
        decision_id: DecisionId,
        hat: HatColor,
        text: impl Into<String>,
        ai_response: Option<String>,
    ) -> Self {
        Self {
            id: StageEventId::new(),
            decision_id,
            hat_color: Some(hat),
            content: EventContent::Analysis(text.into()),
            ai_response,
            metadata: None,
            created_at: Timestamp::now(),
        }
    }

    /// Creates the cross-stage synthesis entry.
    pub fn synthesis(decision_id: DecisionId, output: SynthesisOutput) -> Self {
        Self {
            id: StageEventId::new(),
            decision_id,
            hat_color: None,
            content: EventContent::Synthesis(output),
            ai_response: None,
            metadata: None,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute an event from persistence.
    pub fn reconstitute(
        id: StageEventId,
        decision_id: DecisionId,
        hat_color: Option<HatColor>,
        content: EventContent,
        ai_response: Option<String>,
        metadata: Option<serde_json::Value>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            decision_id,
            hat_color,
            content,
            ai_response,
            metadata,
            created_at,
        }
    }

    /// Attaches provenance metadata (model name, latency, ...).
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the event ID.
    pub fn id(&self) -> &StageEventId {
        &self.id
    }

    /// Returns the owning decision's ID.
    pub fn decision_id(&self) -> &DecisionId {
        &self.decision_id
    }

    /// Returns the stage this entry belongs to, if stage-scoped.
    pub fn hat_color(&self) -> Option<HatColor> {
        self.hat_color
    }

    /// Returns the event type (derived from the payload).
    pub fn event_type(&self) -> EventType {
        self.content.event_type()
    }

    /// Returns the typed payload.
    pub fn content(&self) -> &EventContent {
        &self.content
    }

    /// Returns the raw collaborator response recorded with this entry.
    pub fn ai_response(&self) -> Option<&str> {
        self.ai_response.as_deref()
    }

    /// Returns the provenance metadata.
    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// Returns when the entry was appended.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::QuestionAnswer;

    #[test]
    fn user_input_event_carries_hat_and_type() {
        let decision_id = DecisionId::new();
        let event = StageEvent::user_input(
            decision_id,
            HatColor::Blue,
            StageResponses::new(vec![QuestionAnswer::new(0, "Why now?", "Contract ends")], ""),
        );
        assert_eq!(event.decision_id(), &decision_id);
        assert_eq!(event.hat_color(), Some(HatColor::Blue));
        assert_eq!(event.event_type(), EventType::UserInput);
        assert!(event.content().as_user_input().is_some());
    }

    #[test]
    fn synthesis_event_is_not_stage_scoped() {
        let event = StageEvent::synthesis(DecisionId::new(), SynthesisOutput::default());
        assert_eq!(event.hat_color(), None);
        assert_eq!(event.event_type(), EventType::Synthesis);
    }

    #[test]
    fn analysis_event_keeps_raw_response() {
        let event = StageEvent::analysis(
            DecisionId::new(),
            HatColor::White,
            "Key facts are missing.",
            Some("raw model output".to_string()),
        );
        assert_eq!(event.event_type(), EventType::Analysis);
        assert_eq!(event.ai_response(), Some("raw model output"));
    }

    #[test]
    fn event_type_is_derived_from_payload() {
        let content = EventContent::UserInput(StageResponses::default());
        assert_eq!(content.event_type(), EventType::UserInput);

        let content = EventContent::Analysis("note".to_string());
        assert_eq!(content.event_type(), EventType::Analysis);
    }

    #[test]
    fn metadata_round_trips() {
        let event = StageEvent::synthesis(DecisionId::new(), SynthesisOutput::default())
            .with_metadata(serde_json::json!({"model": "claude"}));
        assert_eq!(
            event.metadata().unwrap().get("model").unwrap(),
            &serde_json::json!("claude")
        );
    }

    #[test]
    fn event_type_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&EventType::UserInput).unwrap(),
            "\"user_input\""
        );
    }
}
