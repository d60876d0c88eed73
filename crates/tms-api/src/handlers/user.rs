//! User handlers: registration, current user, avatar upload.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;

use tms_core::error::AppError;
use tms_service::avatar::AvatarUpload;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{AvatarResponse, CurrentUserResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// Multipart field carrying the avatar file.
const AVATAR_FIELD: &str = "avatar";

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /current-user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = state.user_service.current_user(auth.context()).await?;
    Ok(Json(user.into()))
}

/// PATCH /users/update-avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AvatarResponse>> {
    let mut multipart =
        multipart.map_err(|e| AppError::validation(format!("Invalid form: {}", e.body_text())))?;

    let mut upload: Option<AvatarUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        upload = Some(AvatarUpload { file_name, data });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::validation("avatar file is required"))?;

    let user = state
        .avatar_service
        .update_avatar(auth.context(), upload)
        .await?;

    let avatar = user
        .avatar
        .ok_or_else(|| AppError::internal("Avatar missing after update"))?;

    Ok(Json(AvatarResponse {
        message: "Avatar uploaded".to_string(),
        avatar,
    }))
}
