//! Authentication validator
//!
//! Implements HTTP Basic authentication. The server knows exactly one
//! username/password pair, configured at startup; every data-plane and
//! documentation endpoint is gated on it by exact string equality.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::config::ServerConfig;
use crate::error::AuthError;

/// Performs basic input sanitation on the decoded credential pair.
fn is_valid_input(input: &str) -> bool {
    !input.contains(['\r', '\n', '\0'])
}

/// Validates an `Authorization` header value against the configured pair.
///
/// Expects `Basic <base64(login:password)>`. Anything else, including a
/// missing header, fails with an [`AuthError`] which the caller maps to an
/// unauthorized response carrying a `WWW-Authenticate: Basic` challenge.
pub fn check_credentials(header: Option<&str>, config: &ServerConfig) -> Result<(), AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    let (scheme, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::UnsupportedScheme(scheme.to_string()));
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;

    let (login, password) = decoded.split_once(':').ok_or(AuthError::MalformedHeader)?;

    if !is_valid_input(login) || !is_valid_input(password) {
        return Err(AuthError::MalformedHeader);
    }

    if login == config.login && password == config.password {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials(login.to_string()))
    }
}
