use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::RefreshTokenError;

/// Random bytes per refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// Reads 256 bits from the operating system RNG and hex encodes them. The
/// result is treated as unique without checking storage first; the
/// `UNIQUE` constraint on the token column backs that assumption.
///
/// # Returns
/// 64 lowercase hex characters
///
/// # Errors
/// * `EntropyFailure` - The OS RNG could not be read
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut key = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut key)
        .map_err(|e| RefreshTokenError::EntropyFailure(e.to_string()))?;

    Ok(hex::encode(key))
}
