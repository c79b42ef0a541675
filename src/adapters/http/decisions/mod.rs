//! Decision endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::DecisionHandlers;
pub use routes::decision_routes;
