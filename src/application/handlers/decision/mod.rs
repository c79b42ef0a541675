//! Decision workflow handlers.
//!
//! The stage-advancing handlers (`save_responses`, `skip_stage`) and the
//! on-demand `generate_summary` share one completion procedure in
//! [`completion`]; everything else is the CRUD surface around the process.

mod completion;
mod create_decision;
mod delete_decision;
mod generate_questions;
mod generate_summary;
mod get_decision;
mod get_events;
mod list_decisions;
mod save_responses;
mod skip_stage;
mod update_decision;

pub use completion::{AdvanceOutcome, CompletionError};
pub use create_decision::{
    CreateDecisionCommand, CreateDecisionError, CreateDecisionHandler, CreateDecisionResult,
    NewOptionInput,
};
pub use delete_decision::{DeleteDecisionCommand, DeleteDecisionError, DeleteDecisionHandler};
pub use generate_questions::{
    GenerateQuestionsHandler, GenerateQuestionsQuery, GenerateQuestionsError,
};
pub use generate_summary::{
    GenerateSummaryCommand, GenerateSummaryError, GenerateSummaryHandler,
};
pub use get_decision::{DecisionView, GetDecisionError, GetDecisionHandler, GetDecisionQuery};
pub use get_events::{GetEventsError, GetEventsHandler, GetEventsQuery};
pub use list_decisions::{ListDecisionsError, ListDecisionsHandler, ListDecisionsQuery};
pub use save_responses::{SaveResponsesCommand, SaveResponsesError, SaveResponsesHandler};
pub use skip_stage::{SkipStageCommand, SkipStageError, SkipStageHandler};
pub use update_decision::{UpdateDecisionCommand, UpdateDecisionError, UpdateDecisionHandler};
