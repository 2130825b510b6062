//! In-memory port implementations and request helpers for handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::domain::{Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, MediaError, MediaStore, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use scribe_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

use crate::state::AppState;

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn adjust_post_count(&self, id: Uuid, delta: i32) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.posts += delta;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPostRepo {
    posts: Mutex<HashMap<Uuid, Post>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryPostRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepo {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.creator == creator)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

/// Media store that records calls instead of touching disk.
#[derive(Default)]
pub struct RecordingMediaStore {
    pub stored: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStore for RecordingMediaStore {
    async fn store(&self, original_name: &str, _data: &[u8]) -> Result<String, MediaError> {
        let name = format!("{original_name}-{}", Uuid::new_v4());
        self.stored.lock().unwrap().push(name.clone());
        Ok(name)
    }

    async fn remove(&self, filename: &str) {
        self.removed.lock().unwrap().push(filename.to_owned());
    }
}

/// Everything a handler test needs, with concrete handles kept around for
/// seeding and assertions.
pub struct TestEnv {
    pub state: AppState,
    pub users: Arc<MemoryUserRepo>,
    pub posts: Arc<MemoryPostRepo>,
    pub media: Arc<RecordingMediaStore>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

pub fn test_env() -> TestEnv {
    let users = Arc::new(MemoryUserRepo::default());
    let posts = Arc::new(MemoryPostRepo::default());
    let media = Arc::new(RecordingMediaStore::default());

    let state = AppState {
        users: users.clone(),
        posts: posts.clone(),
        media: media.clone(),
    };

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    TestEnv {
        state,
        users,
        posts,
        media,
        tokens,
        passwords,
    }
}

impl TestEnv {
    pub async fn seed_user(&self, name: &str, email: &str, password: &str) -> User {
        let hash = self.passwords.hash(password).unwrap();
        let user = User::new(name.to_owned(), email.to_owned(), hash);
        self.users.insert(user).await.unwrap()
    }

    pub async fn seed_post(&self, creator: Uuid, title: &str, category: &str) -> Post {
        let post = Post::new(
            title.to_owned(),
            category.to_owned(),
            "a description that is long enough".to_owned(),
            "thumb.png".to_owned(),
            creator,
        );
        self.posts.insert(post).await.unwrap()
    }

    /// `Authorization` header value for a seeded user.
    pub fn bearer(&self, user: &User) -> String {
        format!("Bearer {}", self.tokens.issue(user.id, &user.name).unwrap())
    }
}

pub const BOUNDARY: &str = "test-boundary";

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
}

/// Assemble a `multipart/form-data` body from parts.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
