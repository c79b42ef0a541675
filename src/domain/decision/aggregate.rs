//! Decision aggregate entity.
//!
//! The decision carries the process state: its lifecycle status and the hat
//! currently being worked. Stage transitions go through the mutation methods
//! here; the application layer decides WHEN to call them, this type decides
//! WHETHER the transition is legal.

use crate::domain::decision::DecisionStatus;
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::hats::HatColor;
use serde::{Deserialize, Serialize};

/// Maximum length for decision title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Decision aggregate - one question driven through the six-hat process.
///
/// # Invariants
///
/// - `title` and `description` are non-empty; title is at most 500 chars
/// - `status == Draft` implies no user input has ever been recorded
/// - `status == Completed` implies the process left the sequence
/// - a `Completed` decision accepts no further stage transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier for this decision.
    id: DecisionId,

    /// User who owns this decision.
    owner_id: UserId,

    /// The question being decided.
    title: String,

    /// Context for the question.
    description: String,

    /// Current lifecycle status.
    status: DecisionStatus,

    /// The hat currently being worked; `None` before the first stage action
    /// (and on legacy completed rows - see `HatSequence` on the ambiguity).
    current_hat: Option<HatColor>,

    /// When the decision was created.
    created_at: Timestamp,

    /// When the decision was last updated.
    updated_at: Timestamp,
}

impl Decision {
    /// Create a new draft decision.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or description is empty
    /// - `ValidationFailed` if title exceeds the maximum length
    pub fn new(
        id: DecisionId,
        owner_id: UserId,
        title: String,
        description: String,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_description(&description)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            title,
            description,
            status: DecisionStatus::Draft,
            current_hat: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a decision from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DecisionId,
        owner_id: UserId,
        title: String,
        description: String,
        status: DecisionStatus,
        current_hat: Option<HatColor>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            status,
            current_hat,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the decision ID.
    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    /// Returns the owner's user ID.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Returns the decision title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the decision description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current status.
    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    /// Returns the hat currently being worked, if the process has started.
    pub fn current_hat(&self) -> Option<HatColor> {
        self.current_hat
    }

    /// Returns when the decision was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the decision was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this decision.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Validates that the user may act on this decision.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this decision",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CRUD mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the decision.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `ValidationFailed` on invalid title
    pub fn rename(&mut self, new_title: String) -> Result<(), DomainError> {
        Self::validate_title(&new_title)?;
        self.title = new_title;
        self.touch();
        Ok(())
    }

    /// Update the decision description.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the description is empty
    pub fn update_description(&mut self, description: String) -> Result<(), DomainError> {
        Self::validate_description(&description)?;
        self.description = description;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Process transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// The hat a stage action applies to right now.
    ///
    /// A decision that has not started works the first stage.
    pub fn working_hat(&self) -> HatColor {
        self.current_hat
            .unwrap_or(crate::domain::hats::HatSequence::first())
    }

    /// Marks the process as started. Draft decisions become InProgress; any
    /// other status is left unchanged.
    ///
    /// # Errors
    ///
    /// - `DecisionCompleted` if the process already finished
    pub fn begin(&mut self) -> Result<(), DomainError> {
        self.ensure_not_completed()?;
        if self.status == DecisionStatus::Draft {
            self.status = DecisionStatus::InProgress;
            self.touch();
        }
        Ok(())
    }

    /// Moves the process to the given hat.
    ///
    /// # Errors
    ///
    /// - `DecisionCompleted` if the process already finished
    pub fn move_to_hat(&mut self, hat: HatColor) -> Result<(), DomainError> {
        self.ensure_not_completed()?;
        self.current_hat = Some(hat);
        self.touch();
        Ok(())
    }

    /// Marks the process as completed. The current hat is left where the
    /// process ended (the last stage), not cleared.
    ///
    /// # Errors
    ///
    /// - `DecisionCompleted` if already completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_completed()?;
        self.status = DecisionStatus::Completed;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_not_completed(&self) -> Result<(), DomainError> {
        if self.status == DecisionStatus::Completed {
            return Err(DomainError::new(
                ErrorCode::DecisionCompleted,
                format!("Decision {} has already completed its process", self.id),
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Field 'title' cannot be empty",
            ));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Title exceeds maximum length of {}", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Field 'description' cannot be empty",
            ));
        }
        Ok(())
    }
}
