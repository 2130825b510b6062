use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account.
///
/// `password_hash` never leaves the server; response types expose only the
/// public fields. `posts` is a denormalized count of authored posts, adjusted
/// whenever a post is created or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub posts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a generated id and a zero post count.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            avatar: None,
            posts: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Canonical form for stored and queried email addresses.
pub fn normalize_email(raw: &str) -> String {
    raw.to_lowercase()
}
