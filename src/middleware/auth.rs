use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::{auth::AuthError, AppError};

/// Checks the admin bearer token on an incoming request.
pub struct AuthGuard<'a> {
    admin_token: &'a str,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(admin_token: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            admin_token,
            headers,
        }
    }

    /// Requires `Authorization: Bearer {ADMIN_TOKEN}`.
    ///
    /// # Returns
    /// - `Ok(())` - Token matches
    /// - `Err(AppError::AuthErr(MissingToken))` - No bearer token on the request
    /// - `Err(AppError::AuthErr(InvalidToken))` - Token does not match
    pub fn require(&self) -> Result<(), AppError> {
        let Some(value) = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Err(AuthError::MissingToken.into());
        };

        let Some(token) = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
        else {
            return Err(AuthError::MissingToken.into());
        };

        if !tokens_match(token.trim().as_bytes(), self.admin_token.as_bytes()) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(())
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
