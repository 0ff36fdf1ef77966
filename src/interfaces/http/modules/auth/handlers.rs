//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    RegisterRequest,
};
use crate::application::identity::{IdentityService, RegisterUser};
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService<UserRepository>>,
    pub jwt_config: JwtConfig,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account disabled")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tokens = state
        .identity
        .login(&request.username, &request.password)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        user: UserDto::from(tokens.user),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Username or email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .identity
        .register(RegisterUser {
            username: request.username,
            email: request.email,
            password: request.password,
            full_name: request.full_name,
            role: request.role.as_deref().map(UserRole::parse),
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Fresh access token", body = ApiResponse<RefreshResponse>),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let access_token = state
        .identity
        .refresh(&request.refresh_token)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.access_token_hours * 3600,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .identity
        .get_user(auth.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Invalid current password")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .identity
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
