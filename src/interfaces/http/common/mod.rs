//! Shared HTTP response types.

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

/// Uniform response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated list envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Total page count
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

impl<T, U: From<T>> From<PaginatedResult<T>> for PaginatedResponse<U> {
    fn from(result: PaginatedResult<T>) -> Self {
        Self {
            items: result.items.into_iter().map(U::from).collect(),
            total: result.total,
            page: result.page,
            per_page: result.per_page,
            total_pages: result.total_pages,
        }
    }
}

/// Stable error-kind to HTTP status mapping
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a domain error into the uniform error response.
pub fn error_response(error: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    (status_for(&error), Json(ApiResponse::error(error.to_string())))
}

/// Round a derived mean for presentation; stored values stay unrounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_stable() {
        assert_eq!(
            status_for(&DomainError::InvalidInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Unauthenticated("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::not_found("Call", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(4.256), 4.26);
        assert_eq!(round2(23.0 / 6.0), 3.83);
        assert_eq!(round2(0.0), 0.0);
    }
}
