use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose, Engine as _};

use super::AuthError;

/// Username and password from an `Authorization: Basic ...` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

fn authorization_header(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingCredentials("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AuthError::MissingCredentials("Invalid Authorization header format".to_string()))
}

/// Extract basic credentials from request headers
pub fn extract_basic(headers: &HeaderMap) -> Result<BasicCredentials, AuthError> {
    let value = authorization_header(headers)?;
    let encoded = strip_scheme(value, "Basic").ok_or_else(|| {
        AuthError::MissingCredentials("Authorization header must use Basic credentials".to_string())
    })?;

    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| AuthError::MissingCredentials("Malformed Basic credentials".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::MissingCredentials("Malformed Basic credentials".to_string()))?;

    // Passwords may contain ':'; usernames may not
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::MissingCredentials("Malformed Basic credentials".to_string()))?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Extract a bearer token from request headers
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = authorization_header(headers)?;
    let token = strip_scheme(value, "Bearer").ok_or_else(|| {
        AuthError::MissingCredentials("Authorization header must use Bearer token format".to_string())
    })?;

    if token.is_empty() {
        return Err(AuthError::MissingCredentials("Empty bearer token".to_string()));
    }
    Ok(token.to_string())
}

/// Scheme names are case-insensitive per RFC 7235
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (given, rest) = value.trim().split_once(' ')?;
    given.eq_ignore_ascii_case(scheme).then(|| rest.trim())
}
