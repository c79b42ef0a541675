//! DecisionOption entity.
//!
//! Options are the candidate answers a decision weighs. They are created
//! together with the decision and immutable afterwards; `position` preserves
//! insertion order.

use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, OptionId, Timestamp};
use serde::{Deserialize, Serialize};

/// One candidate answer to a decision, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    id: OptionId,
    decision_id: DecisionId,
    title: String,
    description: Option<String>,
    position: i32,
    created_at: Timestamp,
}

impl DecisionOption {
    /// Create a new option.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is empty
    pub fn new(
        decision_id: DecisionId,
        title: String,
        description: Option<String>,
        position: i32,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Field 'title' cannot be empty",
            ));
        }
        Ok(Self {
            id: OptionId::new(),
            decision_id,
            title,
            description,
            position,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an option from persistence (no validation).
    pub fn reconstitute(
        id: OptionId,
        decision_id: DecisionId,
        title: String,
        description: Option<String>,
        position: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            decision_id,
            title,
            description,
            position,
            created_at,
        }
    }

    /// Returns the option ID.
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    /// Returns the owning decision's ID.
    pub fn decision_id(&self) -> &DecisionId {
        &self.decision_id
    }

    /// Returns the option title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the option description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the insertion position (0-based).
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Returns when the option was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_option_records_position() {
        let decision_id = DecisionId::new();
        let option =
            DecisionOption::new(decision_id, "Take the offer".to_string(), None, 0).unwrap();
        assert_eq!(option.decision_id(), &decision_id);
        assert_eq!(option.position(), 0);
        assert_eq!(option.title(), "Take the offer");
        assert_eq!(option.description(), None);
    }

    #[test]
    fn new_rejects_empty_title() {
        let result = DecisionOption::new(DecisionId::new(), "  ".to_string(), None, 0);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
    }

    #[test]
    fn reconstitute_preserves_all_fields() {
        let id = OptionId::new();
        let decision_id = DecisionId::new();
        let created_at = Timestamp::now();
        let option = DecisionOption::reconstitute(
            id,
            decision_id,
            "Stay".to_string(),
            Some("Keep the current role".to_string()),
            3,
            created_at,
        );
        assert_eq!(option.id(), &id);
        assert_eq!(option.position(), 3);
        assert_eq!(option.description(), Some("Keep the current role"));
        assert_eq!(option.created_at(), &created_at);
    }
}
