//! Windowed dashboard aggregation.

pub mod aggregate;
pub mod service;

pub use aggregate::{CallAggregates, EvaluationAggregates, OperatorPerformance};
pub use service::{
    DashboardService, DashboardStats, OperatorPerformanceReport, RecentActivity,
    DEFAULT_RECENT_LIMIT, DEFAULT_WINDOW_DAYS,
};
