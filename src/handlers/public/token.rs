use axum::{
    extract::{rejection::FormRejection, State},
    response::Json,
    Form,
};
use serde::Deserialize;

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::routes::AppState;

/// OAuth2 password-flow form body. `grant_type`, `scope` and client fields
/// are accepted and ignored.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /token - exchange username/password for a bearer token
///
/// Expected Input (application/x-www-form-urlencoded):
/// `username=...&password=...`
///
/// Expected Output (Success):
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI...", "token_type": "bearer" }
/// ```
///
/// Failure is a 401 with `{"detail": "Incorrect username or password"}`.
/// A body missing either field is a 422 with the same `detail` shape.
pub async fn login_for_access_token(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<AccessToken>, ApiError> {
    let Form(form) = form?;
    let token = state
        .authenticator
        .login(&form.username, &form.password, Some(state.token_ttl))
        .await?;
    Ok(Json(token))
}
