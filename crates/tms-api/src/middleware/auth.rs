//! Auth gate: the only place an authenticated identity enters a request.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use tms_core::error::AppError;
use tms_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the token from an `Authorization` header value.
///
/// Accepts both `Bearer <token>` and a bare token.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Verifies the presented token and stores the caller's
/// [`RequestContext`] in the request extensions.
///
/// Any failure halts the chain with 401 before the handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_header)
        .ok_or_else(|| AppError::unauthorized("Authorization header missing"))?;

    let claims = state.session_manager.verify(token)?;
    let user_id = claims.subject_id()?;

    debug!(user_id, path = %request.uri().path(), "Request authenticated");

    request
        .extensions_mut()
        .insert(RequestContext::new(user_id, claims.email));

    Ok(next.run(request).await)
}
