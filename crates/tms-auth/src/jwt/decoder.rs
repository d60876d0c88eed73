//! Session token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use tms_core::config::AuthConfig;
use tms_core::error::AppError;

use super::claims::Claims;

/// The only message a client ever sees for a rejected token.
const INVALID_TOKEN: &str = "Invalid token";

/// Validates HS256 session tokens against the process secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Fails if the configuration carries no usable secret.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Checks signature, structure, issuer, and expiry. Every failure
    /// yields the same unauthorized error; the precise cause is only logged.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, kind = ?e.kind(), "Token rejected");
                AppError::unauthorized(INVALID_TOKEN)
            })?
            .claims;

        // The library accepts `exp == now`; a token is only valid strictly before expiry.
        if claims.is_expired() {
            debug!(exp = claims.exp, "Token rejected: expired");
            return Err(AppError::unauthorized(INVALID_TOKEN));
        }

        claims.subject_id().inspect_err(|_| {
            debug!(sub = %claims.sub, "Token subject is not a user id");
        })?;

        Ok(claims)
    }
}
