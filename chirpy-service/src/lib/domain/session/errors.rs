use thiserror::Error;

use crate::user::errors::UserError;

/// Error for login, refresh and revoke operations.
///
/// Authentication variants carry no detail about which check failed.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired access token")]
    InvalidAccessToken,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token already exists")]
    RefreshTokenConflict,

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::JwtError> for SessionError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::SigningFailed(msg) => SessionError::TokenGeneration(msg),
            _ => SessionError::InvalidAccessToken,
        }
    }
}

impl From<auth::RefreshTokenError> for SessionError {
    fn from(err: auth::RefreshTokenError) -> Self {
        SessionError::TokenGeneration(err.to_string())
    }
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        SessionError::DatabaseError(err.to_string())
    }
}
