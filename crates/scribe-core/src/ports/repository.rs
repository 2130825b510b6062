use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Absence is not an error at this layer: `find_by_id` returns `Ok(None)`
/// for a missing entity and handlers decide what that means.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (lowercased) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All registered users.
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;

    /// Atomically adjust a user's denormalized post count by `delta`.
    async fn adjust_post_count(&self, id: Uuid, delta: i32) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, most recently updated first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts in a category, most recently created first.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts by an author, most recently created first.
    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<Post>, RepoError>;
}
