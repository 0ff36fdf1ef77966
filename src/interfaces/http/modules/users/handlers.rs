//! User management API handlers
//!
//! Thin wrappers delegating to `IdentityService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::identity::{AccountPatch, IdentityService};
use crate::domain::{UserFilter, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{error_response, ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// User handler state — concrete over `UserRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub identity: Arc<IdentityService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserDto>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let filter = UserFilter {
        role: params.role.as_deref().map(UserRole::parse),
        is_active: params.is_active,
        page: Some(params.page),
        per_page: Some(params.per_page),
    };

    let result = state
        .identity
        .list_users(filter)
        .await
        .map_err(error_response)?;

    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state.identity.get_user(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let patch = AccountPatch {
        full_name: request.full_name,
        email: request.email,
        password: request.password,
        role: request.role.as_deref().map(UserRole::parse),
        is_active: request.is_active,
    };

    let user = state
        .identity
        .update_user(&auth.actor(), id, patch)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_user(
    State(state): State<UserHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .identity
        .deactivate_user(&auth.actor(), id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
