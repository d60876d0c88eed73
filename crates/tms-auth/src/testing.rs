//! In-memory user store used by this crate's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use tms_core::error::AppError;
use tms_core::result::AppResult;
use tms_database::store::UserStore;
use tms_entity::user::{CreateUser, User};

#[derive(Default)]
pub(crate) struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub(crate) async fn insert(&self, email: &str, password_hash: &str) -> User {
        self.create(&CreateUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
        .await
        .unwrap()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email already taken"));
        }
        let user = User {
            id: users.len() as i64 + 1,
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn count_by_email(&self, email: &str) -> AppResult<i64> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .count() as i64)
    }
}
