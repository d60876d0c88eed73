//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tms_entity::user::User;

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable status.
    pub message: String,
    /// Signed session token.
    pub token: String,
}

/// The caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// User ID.
    pub id: i64,
    /// Email address.
    pub email: String,
    /// Avatar URL, if one was uploaded.
    pub avatar: Option<String>,
    /// Account creation time.
    pub created: DateTime<Utc>,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            avatar: user.avatar_url().map(str::to_string),
            email: user.email,
            created: user.created_at,
        }
    }
}

/// Public view of a newly registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL, if any.
    pub avatar: Option<String>,
    /// Account creation time.
    pub created: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            avatar: user.avatar_url().map(str::to_string),
            name: user.name,
            email: user.email,
            created: user.created_at,
        }
    }
}

/// Result of an avatar upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarResponse {
    /// Human-readable status.
    pub message: String,
    /// URL of the new avatar.
    pub avatar: String,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
}
