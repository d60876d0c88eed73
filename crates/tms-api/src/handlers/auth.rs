//! Auth handlers: login and the private route.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token.token,
    }))
}

/// GET /private
pub async fn private(auth: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello {}, you are authenticated", auth.email),
    })
}
