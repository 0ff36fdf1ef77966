//! Call DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Call, CallPriority, CallStatus, DomainError, DomainResult};
use crate::interfaces::http::modules::evaluations::EvaluationDto;

use super::super::users::dto::{default_page, default_per_page};

/// Call API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallDto {
    pub id: i32,
    pub protocol: String,
    pub operator_id: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub subject: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: String,
    pub status: String,
    pub duration_seconds: Option<i32>,
    pub recording_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<Call> for CallDto {
    fn from(c: Call) -> Self {
        Self {
            id: c.id,
            protocol: c.protocol,
            operator_id: c.operator_id,
            customer_name: c.customer_name,
            customer_phone: c.customer_phone,
            customer_email: c.customer_email,
            subject: c.subject,
            description: c.description,
            category: c.category,
            priority: c.priority.as_str().to_string(),
            status: c.status.as_str().to_string(),
            duration_seconds: c.duration_seconds,
            recording_url: c.recording_url,
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
            closed_at: c.closed_at,
        }
    }
}

/// Call detail with its evaluations inlined
#[derive(Debug, Serialize, ToSchema)]
pub struct CallDetailDto {
    #[serde(flatten)]
    pub call: CallDto,
    pub evaluations: Vec<EvaluationDto>,
}

/// Create call request. `operator_id` defaults to the caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCallRequest {
    pub operator_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(max = 20))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    /// low, medium, high or urgent; defaults to medium
    pub priority: Option<String>,
    /// open, in_progress, resolved or closed; defaults to open
    pub status: Option<String>,
    #[validate(range(min = 0))]
    pub duration_seconds: Option<i32>,
    #[validate(length(max = 500))]
    pub recording_url: Option<String>,
    pub notes: Option<String>,
}

/// Update call request; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCallRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: Option<String>,
    #[validate(length(max = 20))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[validate(range(min = 0))]
    pub duration_seconds: Option<i32>,
    #[validate(length(max = 500))]
    pub recording_url: Option<String>,
    pub notes: Option<String>,
}

/// List calls query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCallsParams {
    /// Filter by operator (ignored for operator callers, who are always
    /// scoped to themselves)
    pub operator_id: Option<i32>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    /// Lower creation-time bound (RFC 3339)
    pub date_from: Option<DateTime<Utc>>,
    /// Upper creation-time bound (RFC 3339)
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub(crate) fn parse_status(s: &str) -> DomainResult<CallStatus> {
    CallStatus::parse(s)
        .ok_or_else(|| DomainError::InvalidInput(format!("Unknown call status '{}'", s)))
}

pub(crate) fn parse_priority(s: &str) -> DomainResult<CallPriority> {
    CallPriority::parse(s)
        .ok_or_else(|| DomainError::InvalidInput(format!("Unknown call priority '{}'", s)))
}
