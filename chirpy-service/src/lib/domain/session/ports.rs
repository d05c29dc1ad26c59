use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Port for session operations consumed by the HTTP layer.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Exchange email and password for an access token and a refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenGeneration` - Signing or entropy failure
    /// * `DatabaseError` - Persistence failed
    async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is left untouched.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Unknown, revoked or expired token
    /// * `TokenGeneration` - Signing failure
    /// * `DatabaseError` - Persistence failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token. Revoking twice succeeds.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Unknown token
    /// * `DatabaseError` - Persistence failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Resolve an access token to the user it was issued for.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Malformed, badly signed or expired token
    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenConflict` - Token string already stored
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// Retrieve a refresh token by its string.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` to `at` unless it is already set.
    ///
    /// # Returns
    /// `false` if no record matches `token`
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, SessionError>;
}
