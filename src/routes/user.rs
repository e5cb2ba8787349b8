use crate::{
    AppState,
    auth::{create_token, current_user_id},
    directory::NewUser,
    dto::{AuthResponse, LoginRequest, SignupRequest, UserResponse},
    errors::ApiError,
    models::Author,
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::info;
use validator::Validate;

/// POST /auth/signup
/// Body: { "email": "...", "username": "...", "password": "..." }
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let hashed_password = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::Store(format!("Password hashing failed: {}", e)))?;

    let user = state.directory.register(NewUser {
        email: payload.email,
        username: payload.username,
        hashed_password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        avatar_url: payload.avatar_url,
    })?;

    let token = create_token(&user.id, &user.username, &state.jwt_secret)?;

    info!("New user registered: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /auth/login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let user = state
        .directory
        .get_by_email(&payload.email)
        .ok_or(ApiError::InvalidCredentials)?;

    // Verify password
    let valid = verify(&payload.password, &user.hashed_password)
        .map_err(|e| ApiError::Store(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(&user.id, &user.username, &state.jwt_secret)?;

    info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /users/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = current_user_id(&headers, &state.jwt_secret)?;

    let user = state
        .directory
        .get(&user_id)
        .ok_or_else(|| ApiError::NotFound("No such user.".to_string()))?;

    Ok(Json(user.into()))
}

/// GET /profiles/{username}
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Author>, ApiError> {
    let user = state
        .directory
        .get_by_username(&username)
        .ok_or_else(|| ApiError::NotFound(format!("User {username} not found.")))?;

    Ok(Json(Author::from(&user)))
}
