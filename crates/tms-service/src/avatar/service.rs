//! Avatar replacement for the authenticated user.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use tms_core::config::AvatarConfig;
use tms_core::error::{AppError, ErrorKind};
use tms_core::traits::storage::StorageProvider;
use tms_database::store::UserStore;
use tms_entity::user::User;

use super::processing::{self, ProcessedAvatar};
use crate::context::RequestContext;

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// Client-supplied file name, if any. Only its extension is consulted.
    pub file_name: Option<String>,
    /// Raw uploaded bytes.
    pub data: Bytes,
}

/// Validates, stores, and records new avatars.
#[derive(Clone)]
pub struct AvatarService {
    users: Arc<dyn UserStore>,
    storage: Arc<dyn StorageProvider>,
    config: AvatarConfig,
}

impl std::fmt::Debug for AvatarService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarService")
            .field("storage", &self.storage)
            .field("config", &self.config)
            .finish()
    }
}

impl AvatarService {
    /// Creates a new avatar service.
    pub fn new(
        users: Arc<dyn UserStore>,
        storage: Arc<dyn StorageProvider>,
        config: AvatarConfig,
    ) -> Self {
        Self {
            users,
            storage,
            config,
        }
    }

    /// Replaces the caller's avatar with the uploaded image.
    ///
    /// The new file is written before the user record changes. If the record
    /// cannot be saved the new file is removed again; once it is saved the
    /// previous file is removed on a best-effort basis.
    pub async fn update_avatar(
        &self,
        ctx: &RequestContext,
        upload: AvatarUpload,
    ) -> Result<User, AppError> {
        self.update_avatar_at(ctx, upload, Utc::now()).await
    }

    async fn update_avatar_at(
        &self,
        ctx: &RequestContext,
        upload: AvatarUpload,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let mut user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let processed = self.process(upload).await?;

        // Never reuse the name the record currently points to.
        let previous = user.avatar_file_name().map(str::to_string);
        let filename = processing::generate_filename(
            user.id,
            now,
            &processed.extension,
            previous.as_deref(),
        );
        self.storage
            .write(&filename, Bytes::from(processed.data))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Error saving avatar file", e)
            })?;

        user.avatar = Some(self.config.public_url(&filename));

        if let Err(e) = self.users.save(&user).await {
            warn!(user_id = user.id, error = %e, "Failed to record avatar, removing new file");
            if let Err(cleanup) = self.storage.delete(&filename).await {
                warn!(file = %filename, error = %cleanup, "Failed to remove orphaned avatar");
            }
            return Err(AppError::with_source(
                ErrorKind::Internal,
                "Error updating user avatar",
                e,
            ));
        }

        if let Some(old) = previous {
            self.remove_previous(&old).await;
        }

        info!(
            user_id = user.id,
            file = %filename,
            format = ?processed.format,
            "Avatar updated"
        );
        Ok(user)
    }

    async fn process(&self, upload: AvatarUpload) -> Result<ProcessedAvatar, AppError> {
        let max_bytes = self.config.max_size_bytes;
        let AvatarUpload { file_name, data } = upload;

        tokio::task::spawn_blocking(move || {
            processing::process(Cursor::new(data), max_bytes, file_name.as_deref())
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Image processing task panicked", e))?
    }

    async fn remove_previous(&self, old: &str) {
        match self.storage.delete(old).await {
            Ok(()) => debug!(file = %old, "Removed previous avatar"),
            Err(e) if e.kind == ErrorKind::NotFound => {
                debug!(file = %old, "Previous avatar already gone")
            }
            Err(e) => warn!(file = %old, error = %e, "Failed to remove previous avatar"),
        }
    }
}
