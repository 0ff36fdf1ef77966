use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call status. An unordered label set; the only transition with a side
/// effect is the first move to `Closed` (see [`Call::closed_at_after`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Default for CallStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Call priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for CallPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl CallPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// A logged customer-service call.
///
/// `protocol` is assigned at creation and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub id: i32,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Call {
    /// The `closed_at` value after a status update: stamped on the first
    /// transition to `Closed`, untouched on every later update.
    pub fn closed_at_after(
        &self,
        new_status: Option<CallStatus>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match (new_status, self.closed_at) {
            (Some(CallStatus::Closed), None) => Some(now),
            (_, existing) => existing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn call(status: CallStatus, closed_at: Option<DateTime<Utc>>) -> Call {
        let now = Utc::now();
        Call {
            id: 1,
            protocol: "CALL-20250101120000-ABC123".into(),
            operator_id: 7,
            customer_name: "Customer".into(),
            customer_phone: None,
            customer_email: None,
            subject: "Billing question".into(),
            description: None,
            category: None,
            priority: CallPriority::Medium,
            status,
            duration_seconds: None,
            recording_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
            closed_at,
        }
    }

    #[test]
    fn first_close_stamps_closed_at() {
        let c = call(CallStatus::Open, None);
        let now = Utc::now();
        assert_eq!(c.closed_at_after(Some(CallStatus::Closed), now), Some(now));
    }

    #[test]
    fn second_close_keeps_original_stamp() {
        let stamped = Utc::now() - Duration::hours(2);
        let c = call(CallStatus::Closed, Some(stamped));
        let result = c.closed_at_after(Some(CallStatus::Closed), Utc::now());
        assert_eq!(result, Some(stamped));
    }

    #[test]
    fn non_close_update_leaves_closed_at_untouched() {
        let c = call(CallStatus::Open, None);
        assert_eq!(c.closed_at_after(Some(CallStatus::Resolved), Utc::now()), None);
        assert_eq!(c.closed_at_after(None, Utc::now()), None);

        let stamped = Utc::now() - Duration::days(1);
        let reopened = call(CallStatus::Closed, Some(stamped));
        assert_eq!(
            reopened.closed_at_after(Some(CallStatus::Open), Utc::now()),
            Some(stamped)
        );
    }
}
