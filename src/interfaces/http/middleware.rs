//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::policy::Actor;
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, AuthError, Claims, JwtConfig, TokenKind};

/// Authentication state for the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// The authenticated caller, resolved from a valid access token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    fn from_claims(claims: &Claims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            username: claims.username.clone(),
            role: UserRole::parse(&claims.role),
        })
    }

    /// The policy-layer view of this caller.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires a valid access token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);

    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, TokenKind::Access, &auth_state.jwt_config) {
        Ok(claims) => {
            let Some(user) = AuthenticatedUser::from_claims(&claims) else {
                return auth_error_response(AuthError::InvalidToken);
            };

            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_error_response(e),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let body = Json(json!({
        "success": false,
        "error": error.to_string()
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}
