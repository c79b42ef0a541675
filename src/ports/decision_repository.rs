//! Decision repository port.
//!
//! Defines the contract for persisting and retrieving Decision aggregates
//! and their options. Pure CRUD; the process semantics live in the
//! application layer.

use crate::domain::decision::{Decision, DecisionOption};
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for Decision persistence.
///
/// Implementations must ensure:
/// - options are returned in `position` order
/// - deleting a decision cascades to its options and events
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Save a new decision together with its options.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, decision: &Decision, options: &[DecisionOption])
        -> Result<(), DomainError>;

    /// Update an existing decision (title, description, status, current hat).
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Find a decision by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError>;

    /// Find all decisions owned by a user, most recently updated first.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Decision>, DomainError>;

    /// Load the options of a decision, in insertion order.
    async fn find_options(&self, id: &DecisionId) -> Result<Vec<DecisionOption>, DomainError>;

    /// Delete a decision, cascading to its options and events.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &DecisionId) -> Result<(), DomainError>;
}
