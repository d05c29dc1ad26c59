use std::fmt;

use super::errors::BearerError;

/// Authorization scheme expected in front of the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: ApiKey <key>`
    ApiKey,
}

impl Scheme {
    /// Header prefix for this scheme, including the single separating space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Scheme::Bearer => "Bearer ",
            Scheme::ApiKey => "ApiKey ",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().trim_end())
    }
}

/// Extract the raw credential from an `Authorization` header value.
///
/// The prefix match is case-sensitive. Surrounding whitespace of the
/// credential is trimmed; nothing else about the token is validated.
///
/// # Arguments
/// * `header` - Header value, `None` when the header is absent
/// * `scheme` - Expected scheme
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `BadScheme` - Value does not start with `"<scheme> "`
/// * `EmptyToken` - Nothing but whitespace after the prefix
pub fn extract_token(header: Option<&str>, scheme: Scheme) -> Result<String, BearerError> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(BearerError::MissingHeader),
    };

    let token = value
        .strip_prefix(scheme.prefix())
        .ok_or(BearerError::BadScheme)?
        .trim();

    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token.to_string())
}
