use chrono::{DateTime, Utc};

use super::{CallPriority, CallStatus};

/// Repository-facing record for a new call. The protocol is generated by
/// the call service before the record reaches a repository.
#[derive(Debug, Clone)]
pub struct NewCall {
    pub protocol: String,
    pub operator_id: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub subject: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: CallPriority,
    pub status: CallStatus,
    pub duration_seconds: Option<i32>,
    pub recording_url: Option<String>,
    pub notes: Option<String>,
}

/// Field changes for an existing call. `None` leaves a field untouched.
/// `closed_at` is decided by the call service via
/// [`Call::closed_at_after`](super::Call::closed_at_after), never by
/// callers.
#[derive(Debug, Clone, Default)]
pub struct CallChanges {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<CallPriority>,
    pub status: Option<CallStatus>,
    pub duration_seconds: Option<i32>,
    pub recording_url: Option<String>,
    pub notes: Option<String>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Listing filters for calls.
#[derive(Debug, Clone, Default)]
pub struct CallFilter {
    pub operator_id: Option<i32>,
    pub status: Option<CallStatus>,
    pub category: Option<String>,
    pub priority: Option<CallPriority>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
