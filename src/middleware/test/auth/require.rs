use super::*;

/// Tests a request carrying the configured token.
///
/// Expected: Ok(())
#[test]
fn grants_access_with_matching_token() {
    let headers = headers_with("Bearer s3cret");

    let result = AuthGuard::new("s3cret", &headers).require();

    assert!(result.is_ok());
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_missing_header() {
    let headers = HeaderMap::new();

    let result = AuthGuard::new("s3cret", &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a request using a non-bearer scheme.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_other_schemes() {
    let headers = headers_with("Basic czNjcmV0");

    let result = AuthGuard::new("s3cret", &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a request with the wrong token, including a prefix of the right one.
///
/// Expected: Err(AuthError::InvalidToken)
#[test]
fn rejects_wrong_token() {
    for value in ["Bearer nope", "Bearer s3cre", "Bearer s3cret2"] {
        let headers = headers_with(value);

        let result = AuthGuard::new("s3cret", &headers).require();

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidToken))
        ));
    }
}
