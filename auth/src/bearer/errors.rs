use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header missing")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    BadScheme,

    #[error("Token missing from authorization header")]
    EmptyToken,
}
