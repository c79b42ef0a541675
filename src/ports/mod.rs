//! Ports: contracts between the application core and the outside world.
//!
//! Repositories and the event log face the relational store; the two engine
//! ports face the text-generation collaborators. Implementations live under
//! `crate::adapters`.

mod decision_repository;
mod engine_error;
mod event_log;
mod question_engine;
mod synthesis_engine;

pub use decision_repository::DecisionRepository;
pub use engine_error::EngineError;
pub use event_log::EventLog;
pub use question_engine::{QuestionEngine, QUESTIONS_PER_STAGE};
pub use synthesis_engine::SynthesisEngine;
