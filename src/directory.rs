use crate::{errors::ApiError, models::User};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashSet;
use uuid::Uuid;

/// Profile data for a new directory record. The password arrives already
/// hashed; the directory never sees plaintext.
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// The user directory: the authoritative record of identities, queried by
/// id, username, email, or batch of ids.
#[derive(Default)]
pub struct UserDirectory {
    users: DashMap<Uuid, User>,
    email_index: DashMap<String, Uuid>,
    username_index: DashMap<String, Uuid>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record, rejecting duplicate emails and usernames.
    pub fn register(&self, new_user: NewUser) -> Result<User, ApiError> {
        if self.email_index.contains_key(&new_user.email) {
            return Err(ApiError::Conflict("An account with that email already exists"));
        }
        if self.username_index.contains_key(&new_user.username) {
            return Err(ApiError::Conflict("That username is taken"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            hashed_password: new_user.hashed_password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            avatar_url: new_user.avatar_url,
            created_at: Utc::now().timestamp(),
        };

        self.email_index.insert(user.email.clone(), user.id);
        self.username_index.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user.clone());

        Ok(user)
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).map(|entry| entry.clone())
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        let id = self.username_index.get(username)?;
        self.get(&id)
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        let id = self.email_index.get(email)?;
        self.get(&id)
    }

    /// Fetch many records in one call. Callers resolving authors for a page
    /// of posts use this instead of one lookup per post.
    pub fn get_batch(&self, ids: &HashSet<Uuid>) -> Vec<User> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: username.to_string(),
            hashed_password: "hash".to_string(),
            first_name: None,
            last_name: None,
            avatar_url: None,
        }
    }

    #[test]
    fn register_then_lookup_by_every_key() {
        let directory = UserDirectory::new();
        let user = directory.register(sample("a@example.com", "alpha")).unwrap();

        assert_eq!(directory.get(&user.id).unwrap().id, user.id);
        assert_eq!(directory.get_by_username("alpha").unwrap().id, user.id);
        assert_eq!(directory.get_by_email("a@example.com").unwrap().id, user.id);
        assert!(directory.get_by_username("beta").is_none());
    }

    #[test]
    fn duplicate_email_and_username_conflict() {
        let directory = UserDirectory::new();
        directory.register(sample("a@example.com", "alpha")).unwrap();

        assert!(matches!(
            directory.register(sample("a@example.com", "other")),
            Err(ApiError::Conflict(_))
        ));
        assert!(matches!(
            directory.register(sample("b@example.com", "alpha")),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn batch_returns_only_known_ids() {
        let directory = UserDirectory::new();
        let a = directory.register(sample("a@example.com", "alpha")).unwrap();
        let b = directory.register(sample("b@example.com", "beta")).unwrap();

        let ids: HashSet<Uuid> = [a.id, b.id, Uuid::new_v4()].into_iter().collect();
        let found = directory.get_batch(&ids);
        assert_eq!(found.len(), 2);
    }
}
