use crate::{
    directory::UserDirectory,
    errors::ApiError,
    models::{Author, Post, PostWithAuthor},
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Join author profiles onto a page of posts. One batched directory lookup
/// for the distinct author ids, never a lookup per post.
///
/// A post whose author is missing from the directory means the store and the
/// directory have diverged, so the whole call fails rather than degrading to
/// an unknown-author placeholder.
pub fn attach_authors(
    posts: Vec<Post>,
    directory: &UserDirectory,
) -> Result<Vec<PostWithAuthor>, ApiError> {
    let author_ids: HashSet<Uuid> = posts.iter().map(|post| post.author_id).collect();
    let authors: HashMap<Uuid, Author> = directory
        .get_batch(&author_ids)
        .iter()
        .map(|user| (user.id, Author::from(user)))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let author = authors.get(&post.author_id).cloned().ok_or_else(|| {
                ApiError::InternalConsistency(format!("No author found for post {}", post.id))
            })?;
            Ok(PostWithAuthor { post, author })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::NewUser;

    fn register(directory: &UserDirectory, email: &str, username: &str) -> Uuid {
        directory
            .register(NewUser {
                email: email.to_string(),
                username: username.to_string(),
                hashed_password: "hash".to_string(),
                first_name: None,
                last_name: None,
                avatar_url: None,
            })
            .unwrap()
            .id
    }

    fn post_by(author_id: Uuid, created_at: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            content: "🔥".to_string(),
            created_at,
        }
    }

    #[test]
    fn attaches_distinct_authors_preserving_order() {
        let directory = UserDirectory::new();
        let alpha = register(&directory, "a@example.com", "alpha");
        let beta = register(&directory, "b@example.com", "beta");

        let posts = vec![post_by(beta, 2), post_by(alpha, 1)];
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let enriched = attach_authors(posts, &directory).unwrap();

        assert_eq!(
            enriched.iter().map(|p| p.post.id).collect::<Vec<_>>(),
            ids
        );
        assert_eq!(enriched[0].author.username, "beta");
        assert_eq!(enriched[1].author.username, "alpha");
    }

    #[test]
    fn unknown_author_fails_the_whole_batch() {
        let directory = UserDirectory::new();
        let alpha = register(&directory, "a@example.com", "alpha");

        let posts = vec![post_by(alpha, 1), post_by(Uuid::new_v4(), 2)];
        assert!(matches!(
            attach_authors(posts, &directory),
            Err(ApiError::InternalConsistency(_))
        ));
    }

    #[test]
    fn empty_input_is_empty_output() {
        let directory = UserDirectory::new();
        assert!(attach_authors(Vec::new(), &directory).unwrap().is_empty());
    }
}
