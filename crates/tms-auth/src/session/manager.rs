//! Session manager: exchanges credentials for a signed session token and
//! verifies tokens presented to the auth gate.

use std::sync::Arc;

use tracing::{info, warn};

use tms_core::error::AppError;
use tms_database::store::UserStore;
use tms_entity::user::User;

use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Message for every credential mismatch, so callers cannot probe which
/// emails exist.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The signed session token.
    pub token: IssuedToken,
}

/// Issues and verifies session tokens for stored users.
#[derive(Clone)]
pub struct SessionManager {
    /// Token signer.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token verifier.
    jwt_decoder: Arc<JwtDecoder>,
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("jwt_encoder", &self.jwt_encoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            users,
            password_hasher,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by exact email
    /// 2. Verify the password against the stored digest
    /// 3. Sign a session token for the user
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)
        {
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.jwt_encoder.issue(user.id, &user.email).map_err(|e| {
            warn!(user_id = user.id, error = %e, "Token generation failed");
            AppError::unauthorized("Error generating token")
        })?;

        info!(user_id = user.id, "Login successful");
        Ok(LoginResult { user, token })
    }

    /// Verifies a presented session token.
    ///
    /// Every rejection carries the same "Invalid token" message.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.jwt_decoder.verify(token)
    }
}
