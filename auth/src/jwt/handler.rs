use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Default `iss` claim for access tokens.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// JWT handler for minting and verifying access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are stateless: validity is
/// decided by signature, issuer and expiry alone.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Override the issuer written into and required from tokens.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Mint an access token for `subject`, issued now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn mint(&self, subject: &str, lifetime: Duration) -> Result<String, JwtError> {
        self.mint_at(subject, Utc::now(), lifetime)
    }

    /// Mint an access token for `subject` with an explicit issue instant.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn mint_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(&self.issuer, subject, issued_at, lifetime)?;
        self.encode(&claims)
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// See [`JwtHandler::verify_at`].
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Checks structure, then signature, then issuer, then expiry.
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Not a decodable token for this handler
    /// * `BadSignature` - Signature or algorithm does not match the secret
    /// * `Expired` - `now` is past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against `now`, without leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[&self.issuer]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::BadSignature
                    }
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
