//! Dashboard API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    DashboardStatsDto, OperatorPerformanceReportDto, RecentActivityDto, RecentParams,
    WindowParams,
};
use crate::application::dashboard::DashboardService;
use crate::infrastructure::database::repositories::{
    CallRepository, EvaluationRepository, UserRepository,
};
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Dashboard handler state
#[derive(Clone)]
pub struct DashboardHandlerState {
    pub dashboard: Arc<DashboardService<CallRepository, EvaluationRepository, UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(WindowParams),
    responses(
        (status = 200, description = "Windowed statistics, scoped to the caller", body = ApiResponse<DashboardStatsDto>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn get_stats(
    State(state): State<DashboardHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let stats = state
        .dashboard
        .stats(&auth.actor(), params.days)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(stats.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/operator-performance",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(WindowParams),
    responses(
        (status = 200, description = "Per-operator totals across the window", body = ApiResponse<OperatorPerformanceReportDto>),
        (status = 403, description = "Operators may not view this")
    )
)]
pub async fn get_operator_performance(
    State(state): State<DashboardHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ApiResponse<OperatorPerformanceReportDto>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let report = state
        .dashboard
        .operator_performance(&auth.actor(), params.days)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(report.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/recent-activity",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(RecentParams),
    responses(
        (status = 200, description = "Most recent calls and evaluations, scoped to the caller", body = ApiResponse<RecentActivityDto>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn get_recent_activity(
    State(state): State<DashboardHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<RecentParams>,
) -> Result<Json<ApiResponse<RecentActivityDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let activity = state
        .dashboard
        .recent_activity(&auth.actor(), params.limit)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(activity.into())))
}
