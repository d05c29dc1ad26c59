//! Credential and session token primitives.
//!
//! - Password hashing (Argon2id)
//! - `Authorization` header parsing (`Bearer` and `ApiKey` schemes)
//! - Access token minting and verification (HS256 JWT)
//! - Opaque refresh token generation
//! - Authentication coordination
//!
//! Everything here is synchronous and storage-agnostic. Persisting refresh
//! tokens and looking up users is left to the service using this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.mint("user123", Duration::hours(1)).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Header Parsing
//! ```
//! use auth::{extract_token, BearerError, Scheme};
//!
//! assert_eq!(extract_token(Some("Bearer abc"), Scheme::Bearer).unwrap(), "abc");
//! assert_eq!(
//!     extract_token(Some("Basic abc"), Scheme::Bearer),
//!     Err(BearerError::BadScheme)
//! );
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_token;
pub use bearer::BearerError;
pub use bearer::Scheme;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
