//! The user store boundary consumed by the auth and avatar pipelines.

use async_trait::async_trait;

use tms_core::result::AppResult;
use tms_entity::user::{CreateUser, User};

/// Persistence operations on user records.
///
/// Every method is fallible I/O; callers must not treat a store error as
/// "not found" or "unique".
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user and return the stored row.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Persist every mutable field of an existing user.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Count users with exactly this email.
    async fn count_by_email(&self, email: &str) -> AppResult<i64>;
}
