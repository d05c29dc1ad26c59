use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Failed to create refresh token: {0}")]
    EntropyFailure(String),
}
