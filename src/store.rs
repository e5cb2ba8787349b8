use crate::{errors::ApiError, models::Post};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// Read queries never return more than this many rows.
pub const POST_QUERY_LIMIT: usize = 100;

/// Append-only post storage. Posts are never edited or deleted.
#[derive(Default)]
pub struct PostStore {
    posts: DashMap<Uuid, Post>,
    // Timestamps must never go backwards across inserts, even if the wall
    // clock does.
    last_created_at: AtomicI64,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist one post with a server-assigned timestamp.
    pub fn append(&self, author_id: Uuid, content: String) -> Result<Post, ApiError> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content,
            created_at: self.next_timestamp(),
        };

        if self.posts.insert(post.id, post.clone()).is_some() {
            return Err(ApiError::Store(format!("post id collision: {}", post.id)));
        }

        Ok(post)
    }

    fn next_timestamp(&self) -> i64 {
        let now = Utc::now().timestamp();
        let prev = self.last_created_at.fetch_max(now, Ordering::SeqCst);
        prev.max(now)
    }

    pub fn get(&self, id: &Uuid) -> Option<Post> {
        self.posts.get(id).map(|entry| entry.clone())
    }

    /// All posts, newest first, capped at [`POST_QUERY_LIMIT`].
    pub fn recent(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Self::sort_and_cap(&mut posts);
        posts
    }

    /// One author's posts, newest first, capped at [`POST_QUERY_LIMIT`].
    pub fn by_author(&self, author_id: &Uuid) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| entry.value().author_id == *author_id)
            .map(|entry| entry.value().clone())
            .collect();
        Self::sort_and_cap(&mut posts);
        posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn sort_and_cap(posts: &mut Vec<Post>) {
        // Sort by creation date (newest first); ids break timestamp ties so
        // a page is stable across calls.
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        posts.truncate(POST_QUERY_LIMIT);
    }
}
