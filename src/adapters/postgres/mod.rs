//! PostgreSQL adapters.

mod decision_repository;
mod event_log;

pub use decision_repository::PostgresDecisionRepository;
pub use event_log::PostgresEventLog;
