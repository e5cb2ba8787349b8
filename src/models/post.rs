use crate::models::Author;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored post. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: i64,
}

/// A post joined with its author's directory record for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
}
