//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use tms_auth::credential::CredentialPolicy;
use tms_auth::jwt::{JwtDecoder, JwtEncoder};
use tms_auth::password::{PasswordHasher, PasswordValidator};
use tms_auth::session::SessionManager;
use tms_core::config::AppConfig;
use tms_core::error::AppError;
use tms_core::traits::storage::StorageProvider;
use tms_database::UserRepository;
use tms_database::store::UserStore;
use tms_service::avatar::AvatarService;
use tms_service::user::UserService;
use tms_storage::LocalStorageProvider;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Login and token verification
    pub session_manager: Arc<SessionManager>,
    /// Registration and current-user lookup
    pub user_service: Arc<UserService>,
    /// Avatar upload pipeline
    pub avatar_service: Arc<AvatarService>,
}

impl AppState {
    /// Wires every service from configuration and an already migrated pool.
    ///
    /// Creates the avatar directory if it does not exist.
    pub async fn build(config: AppConfig, db_pool: SqlitePool) -> Result<Self, AppError> {
        config.validate()?;

        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool.clone()));

        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth)?);

        let session_manager = Arc::new(SessionManager::new(
            jwt_encoder,
            jwt_decoder,
            Arc::clone(&users),
            Arc::clone(&password_hasher),
        ));

        let policy = Arc::new(CredentialPolicy::new(
            PasswordValidator::new(),
            Arc::clone(&users),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&password_hasher),
            policy,
        ));

        let storage: Arc<dyn StorageProvider> =
            Arc::new(LocalStorageProvider::new(&config.avatar.directory).await?);
        let avatar_service = Arc::new(AvatarService::new(
            Arc::clone(&users),
            storage,
            config.avatar.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            session_manager,
            user_service,
            avatar_service,
        })
    }
}
