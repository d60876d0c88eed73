//! Password strength policy.

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Message returned for any strength violation.
pub const PASSWORD_RULE_MESSAGE: &str = "Password must be at least 8 characters long and contain \
     at least one uppercase letter, one lowercase letter, and one number";

/// Validates password strength.
///
/// A password is strong iff it is at least [`MIN_PASSWORD_LENGTH`]
/// characters long and contains an ASCII lowercase letter, an ASCII
/// uppercase letter, and an ASCII digit. Each rule is independent.
#[derive(Debug, Clone, Default)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns whether the password satisfies every rule.
    pub fn is_strong(&self, password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
    }
}
