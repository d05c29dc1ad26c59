use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::store::RefreshTokenStore;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Login, refresh and revoke flows.
///
/// Composes the authenticator (password check, access tokens) with the
/// refresh token store and the user repository.
pub struct SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: RefreshTokenStore<TR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, TR> SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: RefreshTokenStore<TR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, TR> SessionServicePort for SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.authenticator.verify_dummy_password(password);
            return Err(SessionError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &user.id.to_string())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored password hash is unusable");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => SessionError::from(err),
            })?;

        let refresh_token = self.refresh_tokens.issue(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let record = self
            .refresh_tokens
            .lookup(refresh_token)
            .await
            .map_err(|e| match e {
                SessionError::RefreshTokenNotFound => SessionError::InvalidRefreshToken,
                other => other,
            })?;

        if !record.is_valid(Utc::now()) {
            tracing::debug!(
                user_id = %record.user_id,
                revoked = record.is_revoked(),
                "Rejected refresh token"
            );
            return Err(SessionError::InvalidRefreshToken);
        }

        Ok(self
            .authenticator
            .issue_access_token(&record.user_id.to_string())?)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.refresh_tokens
            .revoke(refresh_token)
            .await
            .map_err(|e| match e {
                SessionError::RefreshTokenNotFound => SessionError::InvalidRefreshToken,
                other => other,
            })
    }

    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError> {
        let claims = self
            .authenticator
            .validate_access_token(access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                SessionError::InvalidAccessToken
            })?;

        UserId::from_string(&claims.sub).map_err(|_| SessionError::InvalidAccessToken)
    }
}
