//! User registration and current-user lookup.

use std::sync::Arc;

use tracing::info;

use tms_auth::credential::CredentialPolicy;
use tms_auth::password::PasswordHasher;
use tms_core::error::AppError;
use tms_database::store::UserStore;
use tms_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Data submitted to create an account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
}

/// Handles account creation and self lookup.
#[derive(Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Registration rules.
    policy: Arc<CredentialPolicy>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("policy", &self.policy)
            .finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<CredentialPolicy>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// Registers a new user.
    ///
    /// Every rule is checked before anything is written.
    pub async fn register(&self, req: RegisterUser) -> Result<User, AppError> {
        if req.name.trim().is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(AppError::validation(
                "Name, Email, and Password fields are required",
            ));
        }

        self.policy
            .check_new_credentials(&req.email, &req.password)
            .await?;

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                name: req.name,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Gets the authenticated user's record.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
