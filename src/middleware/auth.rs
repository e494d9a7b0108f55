use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::routes::AppState;

/// Subject of the verified bearer token, injected into request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSubject(pub String);

/// Bearer authentication middleware for protected routes
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let subject = state.authenticator.authorize(&token)?;

    tracing::debug!("Authorized request for {}", subject);
    request.extensions_mut().insert(AuthSubject(subject));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.to_string())
}
