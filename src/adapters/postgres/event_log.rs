//! PostgreSQL implementation of EventLog.
//!
//! The `content` column stores the serialized payload; the `event_type`
//! column is the tag that decides how to parse it back. Malformed stored
//! payloads never surface as errors: they fall back to an empty payload of
//! the right type, which the input validator then treats as "no real input".

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::events::{EventContent, EventType, StageEvent, StageResponses};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, StageEventId, Timestamp};
use crate::domain::hats::HatColor;
use crate::domain::synthesis::SynthesisOutput;
use crate::ports::EventLog;

/// PostgreSQL implementation of EventLog.
#[derive(Clone)]
pub struct PostgresEventLog {
    pool: PgPool,
}

impl PostgresEventLog {
    /// Creates a new PostgresEventLog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLog for PostgresEventLog {
    async fn append(&self, event: &StageEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO decision_events (
                id, decision_id, hat_color, event_type, content, ai_response, metadata, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.decision_id().as_uuid())
        .bind(event.hat_color().map(|h| h.as_str()))
        .bind(event.event_type().to_string())
        .bind(content_to_str(event.content())?)
        .bind(event.ai_response())
        .bind(event.metadata())
        .bind(event.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append event: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list(&self, decision_id: &DecisionId) -> Result<Vec<StageEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, decision_id, hat_color, event_type, content, ai_response, metadata, created_at
            FROM decision_events
            WHERE decision_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(decision_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch events: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn list_by_hat(
        &self,
        decision_id: &DecisionId,
        hat: HatColor,
    ) -> Result<Vec<StageEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, decision_id, hat_color, event_type, content, ai_response, metadata, created_at
            FROM decision_events
            WHERE decision_id = $1 AND hat_color = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(decision_id.as_uuid())
        .bind(hat.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch events by hat: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn delete_by_decision(&self, _decision_id: &DecisionId) -> Result<(), DomainError> {
        // ON DELETE CASCADE on decision_events.decision_id does the work
        // when the decision row is removed.
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn content_to_str(content: &EventContent) -> Result<String, DomainError> {
    match content {
        EventContent::Analysis(text) => Ok(text.clone()),
        EventContent::UserInput(responses) => serde_json::to_string(responses).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize responses: {}", e),
            )
        }),
        EventContent::Synthesis(output) => serde_json::to_string(output).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize synthesis: {}", e),
            )
        }),
    }
}

/// Parses a stored content column back into its typed payload.
///
/// Fail-closed: malformed `user_input` and `synthesis` payloads become empty
/// payloads of the right type instead of errors, keeping reads total. The
/// validator then counts them as no real input.
fn parse_content(event_type: &str, content: String) -> Result<EventContent, DomainError> {
    match event_type {
        "analysis" => Ok(EventContent::Analysis(content)),
        "user_input" => {
            let responses = serde_json::from_str::<StageResponses>(&content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Malformed user_input payload; treating as empty");
                StageResponses::default()
            });
            Ok(EventContent::UserInput(responses))
        }
        "synthesis" => {
            let output = serde_json::from_str::<SynthesisOutput>(&content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Malformed synthesis payload; treating as empty");
                SynthesisOutput::default()
            });
            Ok(EventContent::Synthesis(output))
        }
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid event type: {}", other),
        )),
    }
}

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_event(row: sqlx::postgres::PgRow) -> Result<StageEvent, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let decision_id: uuid::Uuid = row
        .try_get("decision_id")
        .map_err(|e| db_err("Failed to get decision_id", e))?;
    let hat_str: Option<String> = row
        .try_get("hat_color")
        .map_err(|e| db_err("Failed to get hat_color", e))?;
    let event_type: String = row
        .try_get("event_type")
        .map_err(|e| db_err("Failed to get event_type", e))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| db_err("Failed to get content", e))?;
    let ai_response: Option<String> = row
        .try_get("ai_response")
        .map_err(|e| db_err("Failed to get ai_response", e))?;
    let metadata: Option<serde_json::Value> = row
        .try_get("metadata")
        .map_err(|e| db_err("Failed to get metadata", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;

    let hat_color = hat_str
        .as_deref()
        .map(|s| {
            s.parse::<HatColor>()
                .map_err(|e| db_err("Invalid hat color", e))
        })
        .transpose()?;

    Ok(StageEvent::reconstitute(
        StageEventId::from_uuid(id),
        DecisionId::from_uuid(decision_id),
        hat_color,
        parse_content(&event_type, content)?,
        ai_response,
        metadata,
        Timestamp::from_datetime(created_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::QuestionAnswer;

    #[test]
    fn content_round_trips_for_every_event_type() {
        let user_input = EventContent::UserInput(StageResponses::new(
            vec![QuestionAnswer::new(0, "Why?", "Because")],
            "notes",
        ));
        let stored = content_to_str(&user_input).unwrap();
        assert_eq!(parse_content("user_input", stored).unwrap(), user_input);

        let analysis = EventContent::Analysis("free text".to_string());
        let stored = content_to_str(&analysis).unwrap();
        assert_eq!(parse_content("analysis", stored).unwrap(), analysis);

        let synthesis = EventContent::Synthesis(SynthesisOutput {
            recommendation: "Go".to_string(),
            ..Default::default()
        });
        let stored = content_to_str(&synthesis).unwrap();
        assert_eq!(parse_content("synthesis", stored).unwrap(), synthesis);
    }

    #[test]
    fn malformed_user_input_falls_back_to_empty_responses() {
        let parsed = parse_content("user_input", "not json at all".to_string()).unwrap();
        match parsed {
            EventContent::UserInput(responses) => assert!(!responses.has_real_input()),
            other => panic!("Expected UserInput, got {:?}", other),
        }
    }

    #[test]
    fn malformed_synthesis_falls_back_to_empty_output() {
        let parsed = parse_content("synthesis", "{broken".to_string()).unwrap();
        match parsed {
            EventContent::Synthesis(output) => assert!(output.recommendation.is_empty()),
            other => panic!("Expected Synthesis, got {:?}", other),
        }
    }

    #[test]
    fn unknown_event_type_is_a_database_error() {
        let result = parse_content("telemetry", "{}".to_string());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::DatabaseError);
    }
}
