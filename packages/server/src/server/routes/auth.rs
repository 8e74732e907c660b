//! Identity endpoints issuing JWTs.
//!
//! Credential handling is deliberately thin: the password hash is produced
//! and checked as an opaque string supplied by the identity collaborator,
//! and the OAuth endpoint trusts the provider/subject pair the collaborator
//! resolved. The actual sign-in dance lives outside this service.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::User;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

fn auth_response(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let token = state
        .jwt_service
        .create_token(user.id.into_uuid(), user.email.clone(), user.is_admin)
        .map_err(ApiError::Internal)?;
    Ok(AuthResponse {
        token,
        user_id: user.id.into_uuid(),
        email: user.email.clone(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: Option<String>,
    /// Opaque, pre-hashed credential from the identity collaborator.
    pub password_hash: String,
}

/// POST /api/auth/register
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }
    if request.password_hash.trim().is_empty() {
        return Err(ApiError::Validation("password_hash is required".to_string()));
    }
    if User::find_by_email(&email, &state.db_pool).await?.is_some() {
        return Err(ApiError::Validation(
            "An account with this email already exists".to_string(),
        ));
    }

    let user = User::create(
        &email,
        request.display_name.as_deref(),
        &request.password_hash,
        &state.db_pool,
    )
    .await?;

    Ok(Json(auth_response(&state, &user)?))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password_hash: String,
}

/// POST /api/auth/login
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();
    let Some(user) = User::find_by_email(&email, &state.db_pool).await? else {
        return Err(ApiError::AuthenticationRequired);
    };

    let matches = user.password_hash.as_deref() == Some(request.password_hash.as_str());
    if !matches {
        return Err(ApiError::AuthenticationRequired);
    }

    Ok(Json(auth_response(&state, &user)?))
}

#[derive(Debug, Deserialize)]
pub struct OAuthRequest {
    /// e.g. "github" or "google"
    pub provider: String,
    /// Subject identifier the provider resolved.
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// POST /api/auth/oauth
pub async fn oauth(
    Extension(state): Extension<AppState>,
    Json(request): Json<OAuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.provider.trim().is_empty() || request.subject.trim().is_empty() {
        return Err(ApiError::Validation(
            "provider and subject are required".to_string(),
        ));
    }
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }

    let user = User::find_or_create_oauth(
        request.provider.trim(),
        request.subject.trim(),
        &email,
        request.display_name.as_deref(),
        &state.db_pool,
    )
    .await?;

    Ok(Json(auth_response(&state, &user)?))
}
