//! Avatar upload configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where avatars are stored, how large they may be, and how they are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Directory holding stored avatar files; also served statically.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Largest accepted upload in bytes (inclusive).
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
    /// Public origin used to build avatar URLs, e.g. `http://localhost:8080`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// URL path the avatar directory is mounted at.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

impl AvatarConfig {
    /// Builds the fully qualified URL for a stored avatar file.
    pub fn public_url(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.mount_path.trim_matches('/'),
            filename
        )
    }

    /// Rejects a zero upload limit.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_size_bytes == 0 {
            return Err(AppError::configuration(
                "avatar.max_size_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_size_bytes: default_max_size(),
            public_base_url: default_public_base_url(),
            mount_path: default_mount_path(),
        }
    }
}

fn default_directory() -> String {
    "avatars".to_string()
}

fn default_max_size() -> u64 {
    1024 * 1024
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_mount_path() -> String {
    "/avatars".to_string()
}
