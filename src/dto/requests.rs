use crate::emoji::is_emoji_only;
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Validate, Deserialize)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct CreatePostRequest {
    #[validate(custom(function = validate_post_content))]
    pub content: String,
}

/// Maximum post length in characters.
pub const MAX_POST_CHARS: usize = 280;

/// One rule per failure mode so clients get a message naming what went wrong.
fn validate_post_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(content_error(
            "content_empty",
            "Please type at least one emoji",
        ));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(content_error(
            "content_too_long",
            "Please type less than 280 characters",
        ));
    }
    if !is_emoji_only(content) {
        return Err(content_error("content_not_emoji", "Only emojis are allowed!"));
    }
    Ok(())
}

fn content_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
