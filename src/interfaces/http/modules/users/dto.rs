//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::User;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            role: u.role.as_str().to_string(),
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Update user request. Profile fields need admin or the account itself;
/// `role` and `is_active` are admin-only.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// New password; empty string is ignored
    pub password: Option<String>,
    /// admin, supervisor or operator
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Filter by role (admin, supervisor, operator)
    pub role: Option<String>,
    /// Filter by active flag
    pub is_active: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    20
}
