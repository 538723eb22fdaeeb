use http::{HeaderMap, header::AUTHORIZATION};

use crate::AuthError;

/// Pull the bearer token out of an `Authorization` header
///
/// # Errors
///
/// Returns [`AuthError::Unauthenticated`] when the header is absent, not
/// valid UTF-8, not a `Bearer` credential, or carries an empty token
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::Unauthenticated)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Unauthenticated);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}
