use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

/// Default refresh token lifetime in days.
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Issues, looks up and revokes refresh tokens.
///
/// Token strings come from [`auth::generate_refresh_token`]; state lives in
/// the repository.
pub struct RefreshTokenStore<TR>
where
    TR: RefreshTokenRepository,
{
    repository: Arc<TR>,
    ttl: Duration,
}

impl<TR> RefreshTokenStore<TR>
where
    TR: RefreshTokenRepository,
{
    pub fn new(repository: Arc<TR>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Generate and persist a refresh token for `user_id`.
    ///
    /// # Errors
    /// * `TokenGeneration` - OS RNG unavailable or expiry out of range
    /// * `RefreshTokenConflict` / `DatabaseError` - Persistence failed
    pub async fn issue(&self, user_id: UserId) -> Result<RefreshToken, SessionError> {
        let token = auth::generate_refresh_token()?;
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            SessionError::TokenGeneration("refresh token lifetime out of range".to_string())
        })?;

        let record = RefreshToken {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        };

        self.repository.create(record).await
    }

    /// # Errors
    /// * `RefreshTokenNotFound` - No record for `token`
    /// * `DatabaseError` - Persistence failed
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, SessionError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)
    }

    /// Mark `token` revoked. Already revoked tokens keep their first
    /// revocation time and the call still succeeds.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No record for `token`
    /// * `DatabaseError` - Persistence failed
    pub async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        if self.repository.revoke(token, Utc::now()).await? {
            Ok(())
        } else {
            Err(SessionError::RefreshTokenNotFound)
        }
    }
}
