use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
};

mod require;

fn headers_with(authorization: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
    headers
}
