use crate::{
    AppState,
    auth::current_user_id,
    dto::CreatePostRequest,
    enrich::attach_authors,
    errors::ApiError,
    models::{Post, PostWithAuthor},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// POST /posts
/// Headers: Authorization: Bearer <token>
/// Body: { "content": "🔥🔥🔥" }
///
/// The write pipeline in order: identity, content validation, rate limit,
/// then the store mutation. Each step short-circuits, so a denial leaves no
/// partial write behind.
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let author_id = current_user_id(&headers, &state.jwt_secret)?;

    payload.validate().map_err(ApiError::from_validation)?;

    if !state.limiter.check(author_id) {
        return Err(ApiError::RateLimited);
    }

    let post = state.posts.append(author_id, payload.content)?;

    info!("Post created: {} by user {}", post.id, author_id);

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts
pub async fn get_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    let posts = state.posts.recent();
    Ok(Json(attach_authors(posts, &state.directory)?))
}

/// GET /users/{user_id}/posts
pub async fn get_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    let posts = state.posts.by_author(&user_id);
    Ok(Json(attach_authors(posts, &state.directory)?))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostWithAuthor>, ApiError> {
    let post = state
        .posts
        .get(&id)
        .ok_or_else(|| ApiError::NotFound("No post with that ID found.".to_string()))?;

    let mut enriched = attach_authors(vec![post], &state.directory)?;
    enriched
        .pop()
        .map(Json)
        .ok_or_else(|| ApiError::InternalConsistency(format!("Enrichment dropped post {id}")))
}
