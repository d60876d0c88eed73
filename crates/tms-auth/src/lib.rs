//! # tms-auth
//!
//! Credential handling for the TMS backend.
//!
//! ## Modules
//!
//! - `credential`: email syntax, password strength, and email uniqueness rules
//! - `password`: Argon2id password hashing and the strength validator
//! - `jwt`: signed session token issuance and verification
//! - `session`: the login flow tying the above together

pub mod credential;
pub mod jwt;
pub mod password;
pub mod session;

pub use credential::CredentialPolicy;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionManager;

#[cfg(test)]
mod testing;
