use crate::{
    config::Config, directory::UserDirectory, ratelimit::PostRateLimiter, store::PostStore,
};
use std::sync::Arc;

/// Shared handles injected into every handler. Services are constructed once
/// at startup; cloning the state clones the `Arc`s, not the services.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub posts: Arc<PostStore>,
    pub limiter: Arc<PostRateLimiter>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            directory: Arc::new(UserDirectory::new()),
            posts: Arc::new(PostStore::new()),
            limiter: Arc::new(PostRateLimiter::new(
                config.rate_limit_max,
                config.rate_limit_window,
            )),
            jwt_secret: config.jwt_secret.clone(),
        }
    }
}
