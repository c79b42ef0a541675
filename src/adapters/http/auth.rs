//! Caller identity extraction.
//!
//! Authentication itself is an external collaborator; this adapter only
//! needs to know WHO the verified caller is. The identity arrives in the
//! `x-user-id` header, which the fronting auth layer is expected to set
//! after verifying credentials. Requests without it are rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::UserId;

use super::decisions::dto::ErrorResponse;

/// Header carrying the verified caller identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the verified caller.
pub struct AuthenticatedUser(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        match UserId::new(header) {
            Ok(user_id) => Ok(AuthenticatedUser(user_id)),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized("Missing caller identity")),
            )),
        }
    }
}
