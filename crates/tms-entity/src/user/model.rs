//! User entity model.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique email address, validated at creation.
    pub email: String,
    /// Argon2 password digest. Never the plaintext.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Fully qualified URL of the current avatar, if any.
    pub avatar: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The avatar reference, treating an empty string as absent.
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Base file name of the stored avatar, derived from its URL.
    ///
    /// Only the final path segment is returned so the result can never
    /// escape the avatar directory.
    pub fn avatar_file_name(&self) -> Option<&str> {
        self.avatar_url()
            .and_then(|url| Path::new(url).file_name())
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty() && *name != "..")
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
