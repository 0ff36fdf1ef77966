//! Dashboard DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::dashboard::{
    CallAggregates, DashboardStats, EvaluationAggregates, OperatorPerformance,
    OperatorPerformanceReport, RecentActivity,
};
use crate::interfaces::http::common::round2;
use crate::interfaces::http::modules::calls::CallDto;
use crate::interfaces::http::modules::evaluations::EvaluationDto;

/// Windowed call statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct CallStatsDto {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    /// Calls without a category count under the key "null"
    pub by_category: BTreeMap<String, u64>,
    pub avg_duration_seconds: f64,
}

impl From<CallAggregates> for CallStatsDto {
    fn from(a: CallAggregates) -> Self {
        Self {
            total: a.total,
            by_status: a.by_status,
            by_priority: a.by_priority,
            by_category: a.by_category,
            avg_duration_seconds: round2(a.avg_duration_seconds),
        }
    }
}

/// Windowed evaluation statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluationStatsDto {
    pub total: u64,
    pub avg_overall_score: f64,
    pub coaching_needed: u64,
    pub exemplary: u64,
}

impl From<EvaluationAggregates> for EvaluationStatsDto {
    fn from(a: EvaluationAggregates) -> Self {
        Self {
            total: a.total,
            avg_overall_score: round2(a.avg_overall_score),
            coaching_needed: a.coaching_needed,
            exemplary: a.exemplary,
        }
    }
}

/// Dashboard stats response
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsDto {
    pub period_days: i64,
    pub calls: CallStatsDto,
    pub evaluations: EvaluationStatsDto,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(s: DashboardStats) -> Self {
        Self {
            period_days: s.period_days,
            calls: s.calls.into(),
            evaluations: s.evaluations.into(),
        }
    }
}

/// One operator's performance row
#[derive(Debug, Serialize, ToSchema)]
pub struct OperatorPerformanceDto {
    pub operator_id: i32,
    pub operator_name: String,
    pub total_calls: u64,
    pub avg_duration_seconds: f64,
    pub avg_score: f64,
}

impl From<OperatorPerformance> for OperatorPerformanceDto {
    fn from(p: OperatorPerformance) -> Self {
        Self {
            operator_id: p.operator_id,
            operator_name: p.operator_name,
            total_calls: p.total_calls,
            avg_duration_seconds: round2(p.avg_duration_seconds),
            avg_score: round2(p.avg_score),
        }
    }
}

/// Operator performance response
#[derive(Debug, Serialize, ToSchema)]
pub struct OperatorPerformanceReportDto {
    pub period_days: i64,
    pub operators: Vec<OperatorPerformanceDto>,
}

impl From<OperatorPerformanceReport> for OperatorPerformanceReportDto {
    fn from(r: OperatorPerformanceReport) -> Self {
        Self {
            period_days: r.period_days,
            operators: r
                .operators
                .into_iter()
                .map(OperatorPerformanceDto::from)
                .collect(),
        }
    }
}

/// Recent activity response
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentActivityDto {
    pub recent_calls: Vec<CallDto>,
    pub recent_evaluations: Vec<EvaluationDto>,
}

impl From<RecentActivity> for RecentActivityDto {
    fn from(a: RecentActivity) -> Self {
        Self {
            recent_calls: a.recent_calls.into_iter().map(CallDto::from).collect(),
            recent_evaluations: a
                .recent_evaluations
                .into_iter()
                .map(EvaluationDto::from)
                .collect(),
        }
    }
}

/// Lookback window parameter
#[derive(Debug, Deserialize, IntoParams)]
pub struct WindowParams {
    /// Number of days to look back (default 30)
    pub days: Option<i64>,
}

/// Recent-activity limit parameter
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentParams {
    /// Number of items per list (default 10)
    pub limit: Option<u64>,
}
