//! Credential policy: email syntax, password strength, and email uniqueness.

pub mod email;

use std::sync::Arc;

use tms_core::error::AppError;
use tms_database::store::UserStore;

use crate::password::{PASSWORD_RULE_MESSAGE, PasswordValidator};

pub use email::is_valid_email;

/// Applies the registration rules for new credentials.
#[derive(Clone)]
pub struct CredentialPolicy {
    /// Password strength rules.
    validator: PasswordValidator,
    /// User store used for the uniqueness check.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for CredentialPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPolicy")
            .field("validator", &self.validator)
            .finish()
    }
}

impl CredentialPolicy {
    /// Creates a new policy backed by the given user store.
    pub fn new(validator: PasswordValidator, users: Arc<dyn UserStore>) -> Self {
        Self { validator, users }
    }

    /// Returns whether the email has acceptable syntax.
    pub fn validate_email_syntax(&self, email: &str) -> bool {
        is_valid_email(email)
    }

    /// Returns whether the password satisfies the strength rules.
    pub fn validate_password_strength(&self, password: &str) -> bool {
        self.validator.is_strong(password)
    }

    /// Returns `true` when no user holds exactly this email.
    ///
    /// Store failures are propagated, never read as "unique".
    pub async fn is_email_unique(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.count_by_email(email).await? == 0)
    }

    /// Runs every registration rule in order, stopping at the first violation.
    ///
    /// Order: syntax, uniqueness, strength.
    pub async fn check_new_credentials(&self, email: &str, password: &str) -> Result<(), AppError> {
        if !self.validate_email_syntax(email) {
            return Err(AppError::validation("Invalid email address"));
        }
        if !self.is_email_unique(email).await? {
            return Err(AppError::conflict("Email already taken"));
        }
        if !self.validate_password_strength(password) {
            return Err(AppError::validation(PASSWORD_RULE_MESSAGE));
        }
        Ok(())
    }
}
