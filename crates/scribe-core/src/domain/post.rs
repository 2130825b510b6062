use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog post.
///
/// `thumbnail` is the filename of an image in the upload area; `creator`
/// references the authoring [`super::User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail: String,
    pub creator: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        title: String,
        category: String,
        description: String,
        thumbnail: String,
        creator: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            category,
            description,
            thumbnail,
            creator,
            created_at: now,
            updated_at: now,
        }
    }
}
