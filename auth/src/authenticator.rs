use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;
use crate::refresh::RefreshTokenError;

/// Default access token lifetime.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup from the server secret and shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    /// Hash of `DUMMY_PASSWORD` with the configured cost, built on first use.
    dummy_hash: OnceLock<Option<String>>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    ///
    /// # Returns
    /// Authenticator with default hashing cost and a one hour access token lifetime
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            dummy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher (e.g. with custom cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.dummy_hash = OnceLock::new();
        self
    }

    /// Set the lifetime of issued access tokens.
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Lifetime of issued access tokens.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unparseable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Run a password verification whose outcome is discarded.
    ///
    /// Call when no account matches, so the miss costs the same Argon2 work
    /// as a wrong password.
    pub fn verify_dummy_password(&self, password: &str) {
        let dummy_hash = self
            .dummy_hash
            .get_or_init(|| self.password_hasher.hash(DUMMY_PASSWORD).ok());

        if let Some(hash) = dummy_hash {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// Verify credentials and mint an access token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unparseable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Mint an access token without password verification.
    ///
    /// Used by the refresh flow, where possession of a valid refresh token
    /// stands in for the password.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.mint(subject, self.access_token_ttl)
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token malformed, badly signed or expired
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Generate a fresh opaque refresh token.
    ///
    /// # Errors
    /// * `EntropyFailure` - OS RNG unavailable
    pub fn generate_refresh_token(&self) -> Result<String, RefreshTokenError> {
        generate_refresh_token()
    }
}
