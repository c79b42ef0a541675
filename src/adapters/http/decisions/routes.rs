//! HTTP routes for decision endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    create_decision, delete_decision, generate_questions, generate_summary, get_decision,
    get_events, list_decisions, save_responses, skip_stage, update_decision, DecisionHandlers,
};

/// Creates the decision router with all endpoints.
pub fn decision_routes(handlers: DecisionHandlers) -> Router {
    Router::new()
        .route("/", post(create_decision))
        .route("/", get(list_decisions))
        .route("/:id", get(get_decision))
        .route("/:id", patch(update_decision))
        .route("/:id", delete(delete_decision))
        .route("/:id/events", get(get_events))
        .route("/:id/hats/:hat/questions", post(generate_questions))
        .route("/:id/responses", post(save_responses))
        .route("/:id/skip", post(skip_stage))
        .route("/:id/summary", post(generate_summary))
        .with_state(handlers)
}
