//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{MediaStore, PostRepository, UserRepository};
use scribe_infra::database;
use scribe_infra::{FsMediaStore, PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Connect to the database and build the repository and media
    /// implementations behind the port traits.
    pub async fn init(config: &AppConfig) -> std::io::Result<Self> {
        let db = database::connect(&config.database)
            .await
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;

        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db));
        let media: Arc<dyn MediaStore> = Arc::new(FsMediaStore::new(&config.upload_dir)?);

        tracing::info!("Application state initialized");

        Ok(Self {
            users,
            posts,
            media,
        })
    }
}
