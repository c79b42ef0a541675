//! In-process adapters.
//!
//! Back the repository and event-log ports with plain collections behind a
//! mutex: a HashMap of decisions and an append-only vector of events. Used
//! by unit and integration tests, and usable for local runs without a
//! database.

mod decision_repository;
mod event_log;

pub use decision_repository::InMemoryDecisionRepository;
pub use event_log::InMemoryEventLog;
