//! HTTP handlers for decision endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::auth::AuthenticatedUser;
use crate::application::handlers::decision::{
    AdvanceOutcome, CreateDecisionCommand, CreateDecisionError, CreateDecisionHandler,
    DeleteDecisionCommand, DeleteDecisionError, DeleteDecisionHandler, GenerateQuestionsError,
    GenerateQuestionsHandler, GenerateQuestionsQuery, GenerateSummaryCommand,
    GenerateSummaryError, GenerateSummaryHandler, GetDecisionError, GetDecisionHandler,
    GetDecisionQuery, GetEventsError, GetEventsHandler, GetEventsQuery, ListDecisionsError,
    ListDecisionsHandler, ListDecisionsQuery, NewOptionInput, SaveResponsesCommand,
    SaveResponsesError, SaveResponsesHandler, SkipStageCommand, SkipStageError, SkipStageHandler,
    UpdateDecisionCommand, UpdateDecisionError, UpdateDecisionHandler,
};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode};
use crate::domain::hats::HatColor;

use super::dto::{
    AdvanceResponse, CreateDecisionRequest, DecisionDetailResponse, DecisionListResponse,
    DecisionResponse, ErrorResponse, EventListResponse, EventResponse, EventsQueryParams,
    QuestionsResponse, SaveResponsesRequest, SummaryResponse, UpdateDecisionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DecisionHandlers {
    pub create: Arc<CreateDecisionHandler>,
    pub list: Arc<ListDecisionsHandler>,
    pub get: Arc<GetDecisionHandler>,
    pub update: Arc<UpdateDecisionHandler>,
    pub delete: Arc<DeleteDecisionHandler>,
    pub get_events: Arc<GetEventsHandler>,
    pub generate_questions: Arc<GenerateQuestionsHandler>,
    pub save_responses: Arc<SaveResponsesHandler>,
    pub skip_stage: Arc<SkipStageHandler>,
    pub generate_summary: Arc<GenerateSummaryHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/decisions - Create a decision with options
pub async fn create_decision(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(req): Json<CreateDecisionRequest>,
) -> Response {
    let cmd = CreateDecisionCommand {
        owner_id: user_id,
        title: req.title,
        description: req.description,
        options: req
            .options
            .into_iter()
            .map(|o| NewOptionInput {
                title: o.title,
                description: o.description,
            })
            .collect(),
    };

    match handlers.create.handle(cmd).await {
        Ok(result) => {
            let response = DecisionDetailResponse {
                decision: DecisionResponse::from(&result.decision),
                options: result.options.iter().map(Into::into).collect(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(CreateDecisionError::Domain(err)) => domain_error_response(err),
    }
}

/// GET /api/decisions - List the caller's decisions
pub async fn list_decisions(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Response {
    match handlers.list.handle(ListDecisionsQuery { user_id }).await {
        Ok(decisions) => {
            let response = DecisionListResponse {
                decisions: decisions.iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(ListDecisionsError::Domain(err)) => domain_error_response(err),
    }
}

/// GET /api/decisions/:id - Decision with its options
pub async fn get_decision(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .get
        .handle(GetDecisionQuery {
            decision_id,
            user_id,
        })
        .await
    {
        Ok(view) => {
            let response = DecisionDetailResponse {
                decision: DecisionResponse::from(&view.decision),
                options: view.options.iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GetDecisionError::DecisionNotFound(id)) => not_found_response(id),
        Err(GetDecisionError::Domain(err)) => domain_error_response(err),
    }
}

/// PATCH /api/decisions/:id - Update title/description
pub async fn update_decision(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDecisionRequest>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    let cmd = UpdateDecisionCommand {
        decision_id,
        user_id,
        title: req.title,
        description: req.description,
    };

    match handlers.update.handle(cmd).await {
        Ok(decision) => {
            (StatusCode::OK, Json(DecisionResponse::from(&decision))).into_response()
        }
        Err(UpdateDecisionError::DecisionNotFound(id)) => not_found_response(id),
        Err(UpdateDecisionError::Domain(err)) => domain_error_response(err),
    }
}

/// DELETE /api/decisions/:id - Delete with options and events
pub async fn delete_decision(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .delete
        .handle(DeleteDecisionCommand {
            decision_id,
            user_id,
        })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(DeleteDecisionError::DecisionNotFound(id)) => not_found_response(id),
        Err(DeleteDecisionError::Domain(err)) => domain_error_response(err),
    }
}

/// GET /api/decisions/:id/events - Process history (optionally ?hat=...)
pub async fn get_events(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
    Query(params): Query<EventsQueryParams>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .get_events
        .handle(GetEventsQuery {
            decision_id,
            user_id,
            hat: params.hat,
        })
        .await
    {
        Ok(events) => {
            let response = EventListResponse {
                events: events.iter().map(EventResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GetEventsError::DecisionNotFound(id)) => not_found_response(id),
        Err(GetEventsError::Domain(err)) => domain_error_response(err),
    }
}

/// POST /api/decisions/:id/hats/:hat/questions - Stage questions
pub async fn generate_questions(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((id, hat)): Path<(String, String)>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };
    let Ok(hat) = hat.parse::<HatColor>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid hat color")),
        )
            .into_response();
    };

    match handlers
        .generate_questions
        .handle(GenerateQuestionsQuery {
            decision_id,
            user_id,
            hat,
        })
        .await
    {
        Ok(questions) => (StatusCode::OK, Json(QuestionsResponse { questions })).into_response(),
        Err(GenerateQuestionsError::DecisionNotFound(id)) => not_found_response(id),
        Err(GenerateQuestionsError::Domain(err)) => domain_error_response(err),
    }
}

/// POST /api/decisions/:id/responses - Record answers and advance
pub async fn save_responses(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
    Json(req): Json<SaveResponsesRequest>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .save_responses
        .handle(SaveResponsesCommand {
            decision_id,
            user_id,
            responses: req,
        })
        .await
    {
        Ok(outcome) => advance_response(outcome),
        Err(SaveResponsesError::DecisionNotFound(id)) => not_found_response(id),
        Err(SaveResponsesError::Domain(err)) => domain_error_response(err),
        Err(SaveResponsesError::Synthesis(err)) => engine_error_response(err.to_string()),
    }
}

/// POST /api/decisions/:id/skip - Skip the current stage
pub async fn skip_stage(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .skip_stage
        .handle(SkipStageCommand {
            decision_id,
            user_id,
        })
        .await
    {
        Ok(outcome) => advance_response(outcome),
        Err(SkipStageError::DecisionNotFound(id)) => not_found_response(id),
        Err(SkipStageError::Domain(err)) => domain_error_response(err),
        Err(SkipStageError::Synthesis(err)) => engine_error_response(err.to_string()),
    }
}

/// POST /api/decisions/:id/summary - Generate or re-read the summary
pub async fn generate_summary(
    State(handlers): State<DecisionHandlers>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Response {
    let Some(decision_id) = parse_decision_id(&id) else {
        return invalid_id_response();
    };

    match handlers
        .generate_summary
        .handle(GenerateSummaryCommand {
            decision_id,
            user_id,
        })
        .await
    {
        Ok(outcome) => {
            (StatusCode::OK, Json(SummaryResponse::from(outcome))).into_response()
        }
        Err(GenerateSummaryError::DecisionNotFound(id)) => not_found_response(id),
        Err(GenerateSummaryError::StagesRemaining(_)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                ErrorCode::StagesRemaining.to_string(),
                "The process has stages left to work through",
            )),
        )
            .into_response(),
        Err(GenerateSummaryError::Domain(err)) => domain_error_response(err),
        Err(GenerateSummaryError::Synthesis(err)) => engine_error_response(err.to_string()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_decision_id(raw: &str) -> Option<DecisionId> {
    raw.parse::<DecisionId>().ok()
}

fn advance_response(outcome: AdvanceOutcome) -> Response {
    let response = match outcome {
        AdvanceOutcome::Advanced { decision } => AdvanceResponse {
            decision: DecisionResponse::from(&decision),
            finished: false,
            summary: None,
        },
        AdvanceOutcome::Finished { decision, summary } => AdvanceResponse {
            decision: DecisionResponse::from(&decision),
            finished: true,
            summary: Some(SummaryResponse::from(summary)),
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn invalid_id_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("Invalid decision ID")),
    )
        .into_response()
}

fn not_found_response(id: DecisionId) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            ErrorCode::DecisionNotFound.to_string(),
            format!("Decision not found: {}", id),
        )),
    )
        .into_response()
}

fn engine_error_response(message: String) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new(ErrorCode::EngineFailure.to_string(), message)),
    )
        .into_response()
}

fn domain_error_response(err: DomainError) -> Response {
    let status = match err.code {
        ErrorCode::DecisionNotFound | ErrorCode::OptionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::InvalidStateTransition
        | ErrorCode::DecisionCompleted
        | ErrorCode::StagesRemaining
        | ErrorCode::SynthesisAlreadyRecorded => StatusCode::CONFLICT,
        ErrorCode::EngineFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse::new(err.code.to_string(), err.message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_expected_status_codes() {
        let cases = [
            (ErrorCode::DecisionNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::Forbidden, StatusCode::FORBIDDEN),
            (ErrorCode::EmptyField, StatusCode::BAD_REQUEST),
            (ErrorCode::DecisionCompleted, StatusCode::CONFLICT),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = domain_error_response(DomainError::new(code, "test"));
            assert_eq!(response.status(), expected, "code {:?}", code);
        }
    }
}
