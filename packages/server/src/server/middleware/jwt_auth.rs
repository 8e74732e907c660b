use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{middleware::Next, response::Response};
use tracing::debug;

use crate::common::{ApiError, UserId};
use crate::domains::auth::JwtService;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

/// JWT authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it,
/// and adds AuthUser to request extensions. Without a valid token the
/// request continues unauthenticated; handlers that need identity reject
/// via [`RequireAuth`].
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!("Authenticated user: {} (admin: {})", user.user_id, user.is_admin);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
        email: claims.email,
        is_admin: claims.is_admin,
    })
}

/// Extractor for handlers that require a signed-in user. Rejects with
/// `AuthenticationRequired` when the middleware attached no identity.
pub struct RequireAuth(pub AuthUser);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(ApiError::AuthenticationRequired)
    }
}

/// Extractor for handlers where identity is optional (e.g. the duplicate
/// check marks results claimable only for signed-in callers).
pub struct MaybeAuth(pub Option<AuthUser>);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<AuthUser>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn extract_token_with_bearer_prefix() {
        let jwt_service = JwtService::new("test_secret", "altdir-test".to_string());
        let user_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(user_id, "dev@example.org".to_string(), true)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().user_id, UserId::from_uuid(user_id));
    }

    #[test]
    fn extract_raw_token() {
        let jwt_service = JwtService::new("test_secret", "altdir-test".to_string());
        let user_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(user_id, "dev@example.org".to_string(), false)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
    }

    #[test]
    fn missing_header_yields_none() {
        let jwt_service = JwtService::new("test_secret", "altdir-test".to_string());
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn garbage_token_yields_none() {
        let jwt_service = JwtService::new("test_secret", "altdir-test".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer garbage")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }
}
