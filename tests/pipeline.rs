//! End-to-end exercises of the write and read pipelines, driving the axum
//! handlers directly with constructed state.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use chirp_api::{
    AppState,
    directory::UserDirectory,
    dto::{CreatePostRequest, SignupRequest},
    errors::ApiError,
    ratelimit::PostRateLimiter,
    routes::{post, user},
    store::PostStore,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use uuid::Uuid;

const JWT_SECRET: &str = "pipeline-test-secret";

fn test_state() -> AppState {
    AppState {
        directory: Arc::new(UserDirectory::new()),
        posts: Arc::new(PostStore::new()),
        limiter: Arc::new(PostRateLimiter::new(
            NonZeroU32::new(3).unwrap(),
            Duration::from_secs(60),
        )),
        jwt_secret: JWT_SECRET.to_string(),
    }
}

async fn signup(state: &AppState, email: &str, username: &str) -> (Uuid, HeaderMap) {
    let response = user::signup(
        State(state.clone()),
        Json(SignupRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: None,
            last_name: None,
            avatar_url: None,
        }),
    )
    .await
    .expect("signup should succeed");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", response.0.token)).unwrap(),
    );
    (response.0.user.id, headers)
}

async fn write_post(
    state: &AppState,
    headers: &HeaderMap,
    content: &str,
) -> Result<(StatusCode, Json<chirp_api::models::Post>), ApiError> {
    post::create_post(
        State(state.clone()),
        headers.clone(),
        Json(CreatePostRequest {
            content: content.to_string(),
        }),
    )
    .await
}

#[tokio::test]
async fn valid_emoji_post_is_persisted() {
    let state = test_state();
    let (author_id, headers) = signup(&state, "a@example.com", "alpha").await;

    let (status, Json(created)) = write_post(&state, &headers, "🔥🎉").await.unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.author_id, author_id);
    assert_eq!(created.content, "🔥🎉");
    assert_eq!(state.posts.len(), 1);
}

#[tokio::test]
async fn invalid_content_is_rejected_without_a_write() {
    let state = test_state();
    let (_, headers) = signup(&state, "a@example.com", "alpha").await;

    for content in ["", "plain text", "🔥 with words"] {
        let err = write_post(&state, &headers, content).await.unwrap_err();
        assert!(
            matches!(err, ApiError::Validation { ref field, .. } if field == "content"),
            "content {content:?} should fail validation, got {err:?}"
        );
    }
    assert!(state.posts.is_empty());
}

#[tokio::test]
async fn anonymous_write_fails_before_validation() {
    let state = test_state();

    // Invalid content too: the identity check must fire first.
    let err = write_post(&state, &HeaderMap::new(), "not emoji")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated));
    assert!(state.posts.is_empty());
}

#[tokio::test]
async fn fourth_write_in_window_is_rate_limited() {
    let state = test_state();
    let (_, headers) = signup(&state, "a@example.com", "alpha").await;

    for _ in 0..3 {
        write_post(&state, &headers, "🚀").await.unwrap();
    }

    let err = write_post(&state, &headers, "🚀").await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited));
    // Denied write left no partial row behind.
    assert_eq!(state.posts.len(), 3);
}

#[tokio::test]
async fn rate_limit_is_per_identity() {
    let state = test_state();
    let (_, alpha) = signup(&state, "a@example.com", "alpha").await;
    let (_, beta) = signup(&state, "b@example.com", "beta").await;

    for _ in 0..3 {
        write_post(&state, &alpha, "🌊").await.unwrap();
    }
    assert!(matches!(
        write_post(&state, &alpha, "🌊").await.unwrap_err(),
        ApiError::RateLimited
    ));

    write_post(&state, &beta, "🌋").await.unwrap();
}

#[tokio::test]
async fn all_posts_come_back_enriched_with_their_authors() {
    let state = test_state();
    let (alpha_id, alpha) = signup(&state, "a@example.com", "alpha").await;
    let (beta_id, beta) = signup(&state, "b@example.com", "beta").await;

    write_post(&state, &alpha, "🌊").await.unwrap();
    write_post(&state, &beta, "🌋").await.unwrap();

    let Json(posts) = post::get_posts(State(state.clone())).await.unwrap();

    assert_eq!(posts.len(), 2);
    for enriched in &posts {
        assert_eq!(enriched.post.author_id, enriched.author.id);
        let expected = if enriched.author.id == alpha_id {
            ("alpha", "🌊")
        } else {
            ("beta", "🌋")
        };
        assert_eq!(enriched.author.username, expected.0);
        assert_eq!(enriched.post.content, expected.1);
    }
    assert!(posts.iter().any(|p| p.author.id == alpha_id));
    assert!(posts.iter().any(|p| p.author.id == beta_id));
}

#[tokio::test]
async fn posts_by_author_are_filtered() {
    let state = test_state();
    let (alpha_id, alpha) = signup(&state, "a@example.com", "alpha").await;
    let (_, beta) = signup(&state, "b@example.com", "beta").await;

    write_post(&state, &alpha, "🌊").await.unwrap();
    write_post(&state, &beta, "🌋").await.unwrap();

    let Json(posts) = post::get_posts_by_user(State(state.clone()), Path(alpha_id))
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author.username, "alpha");
}

#[tokio::test]
async fn post_lookup_by_id_round_trips_and_misses_with_not_found() {
    let state = test_state();
    let (_, headers) = signup(&state, "a@example.com", "alpha").await;
    let (_, Json(created)) = write_post(&state, &headers, "🎯").await.unwrap();

    let Json(found) = post::get_post(State(state.clone()), Path(created.id))
        .await
        .unwrap();
    assert_eq!(found.post.id, created.id);
    assert_eq!(found.author.username, "alpha");

    let err = post::get_post(State(state.clone()), Path(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let state = test_state();

    let err = user::get_user_by_username(State(state.clone()), Path("nonexistent".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    signup(&state, "a@example.com", "alpha").await;
    let Json(author) = user::get_user_by_username(State(state.clone()), Path("alpha".to_string()))
        .await
        .unwrap();
    assert_eq!(author.username, "alpha");
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_wrong_password_is_rejected() {
    let state = test_state();
    signup(&state, "a@example.com", "alpha").await;

    let dup = user::signup(
        State(state.clone()),
        Json(SignupRequest {
            email: "a@example.com".to_string(),
            username: "other".to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: None,
            last_name: None,
            avatar_url: None,
        }),
    )
    .await;
    assert!(matches!(dup.unwrap_err(), ApiError::Conflict(_)));

    let bad_login = user::login(
        State(state.clone()),
        Json(chirp_api::dto::LoginRequest {
            email: "a@example.com".to_string(),
            password: "wrong-password".to_string(),
        }),
    )
    .await;
    assert!(matches!(bad_login.unwrap_err(), ApiError::InvalidCredentials));
}
