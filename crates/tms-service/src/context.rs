//! Request context carrying the authenticated identity.

use serde::{Deserialize, Serialize};

/// Identity of the caller of a protected operation.
///
/// Only the auth gate constructs this, from a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The email carried by the verified token.
    pub email: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, email: String) -> Self {
        Self { user_id, email }
    }
}
