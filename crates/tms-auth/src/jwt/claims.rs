//! Claims carried by every session token.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use tms_core::error::AppError;

/// JWT claims payload identifying a session's subject.
///
/// Tokens are stateless: nothing about a session is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID in decimal form.
    pub sub: String,
    /// Email of the subject at issuance time.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// Returns the numeric user ID from the subject claim.
    pub fn subject_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token"))
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
