//! Emoji-only micro-posting API.
//!
//! A small typed HTTP/JSON surface over three explicitly constructed
//! services: a user directory (identities and profiles), an append-only post
//! store, and a per-author rate limiter guarding the write path.

pub mod auth;
pub mod config;
pub mod directory;
pub mod dto;
pub mod emoji;
pub mod enrich;
pub mod errors;
pub mod models;
pub mod ratelimit;
pub mod routes;
pub mod state;
pub mod store;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(routes::health::health_check))
        .route("/auth/signup", post(routes::user::signup))
        .route("/auth/login", post(routes::user::login))
        .route("/profiles/{username}", get(routes::user::get_user_by_username))
        .route("/posts", post(routes::post::create_post).get(routes::post::get_posts))
        .route("/posts/{id}", get(routes::post::get_post))
        .route("/users/{user_id}/posts", get(routes::post::get_posts_by_user))
        // Protected routes (auth required)
        .route("/users/me", get(routes::user::get_current_user))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
