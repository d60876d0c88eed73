//! Token signing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session token configuration.
///
/// The secret is read once at startup and never changes afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Must be non-empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// Issuer claim written into and required from every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    /// Fail fast when no usable signing secret is configured.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set (use TMS__AUTH__JWT_SECRET or SECRET_KEY)",
            ));
        }
        if self.token_ttl_days <= 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_days must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            issuer: default_issuer(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_days", &self.token_ttl_days)
            .field("issuer", &self.issuer)
            .finish()
    }
}

fn default_token_ttl_days() -> i64 {
    365
}

fn default_issuer() -> String {
    "TMS".to_string()
}
