//! HTTP adapter: exposes the operation surface as JSON endpoints.

mod auth;
pub mod decisions;

pub use auth::AuthenticatedUser;

use axum::Router;
use tower_http::trace::TraceLayer;

use decisions::DecisionHandlers;

/// Builds the application router.
pub fn app_router(handlers: DecisionHandlers) -> Router {
    Router::new()
        .nest("/api/decisions", decisions::decision_routes(handlers))
        .layer(TraceLayer::new_for_http())
}
