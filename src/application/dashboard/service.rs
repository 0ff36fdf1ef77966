//! Dashboard service — windowed statistics, scoped to the caller.

use std::sync::Arc;

use chrono::{Duration, Utc};

use super::aggregate::{
    aggregate_calls, aggregate_evaluations, operator_performance, CallAggregates,
    EvaluationAggregates, OperatorPerformance,
};
use crate::domain::{
    authorize, Action, Actor, Call, CallRepositoryInterface, DomainResult, Evaluation,
    EvaluationRepositoryInterface, UserRepositoryInterface, UserRole,
};

/// Lookback window applied when the caller does not pass one.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
/// Recent-activity item count applied when the caller does not pass one.
pub const DEFAULT_RECENT_LIMIT: u64 = 10;

#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub period_days: i64,
    pub calls: CallAggregates,
    pub evaluations: EvaluationAggregates,
}

#[derive(Debug, Clone)]
pub struct OperatorPerformanceReport {
    pub period_days: i64,
    pub operators: Vec<OperatorPerformance>,
}

#[derive(Debug, Clone)]
pub struct RecentActivity {
    pub recent_calls: Vec<Call>,
    pub recent_evaluations: Vec<Evaluation>,
}

pub struct DashboardService<C, E, U>
where
    C: CallRepositoryInterface,
    E: EvaluationRepositoryInterface,
    U: UserRepositoryInterface,
{
    calls: Arc<C>,
    evaluations: Arc<E>,
    users: Arc<U>,
}

impl<C, E, U> DashboardService<C, E, U>
where
    C: CallRepositoryInterface,
    E: EvaluationRepositoryInterface,
    U: UserRepositoryInterface,
{
    pub fn new(calls: Arc<C>, evaluations: Arc<E>, users: Arc<U>) -> Self {
        Self {
            calls,
            evaluations,
            users,
        }
    }

    /// Operators see only their own numbers; supervisors and admins see
    /// the whole organization.
    fn scope(actor: &Actor) -> Option<i32> {
        (actor.role == UserRole::Operator).then_some(actor.id)
    }

    /// Windowed statistics over calls and evaluations. The boundary is
    /// evaluated at query time: everything created in the closed
    /// interval `[now - days, now]` counts.
    pub async fn stats(&self, actor: &Actor, days: Option<i64>) -> DomainResult<DashboardStats> {
        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS).max(0);
        let since = Utc::now() - Duration::days(days);
        let scope = Self::scope(actor);

        let calls = self.calls.list_calls_since(since, scope).await?;
        let evaluations = self.evaluations.list_evaluations_since(since, scope).await?;

        Ok(DashboardStats {
            period_days: days,
            calls: aggregate_calls(&calls),
            evaluations: aggregate_evaluations(&evaluations),
        })
    }

    /// Per-operator totals across the window. Evaluations are attributed
    /// through the operator's calls in the window, left-joined so an
    /// operator with zero evaluations still appears.
    pub async fn operator_performance(
        &self,
        actor: &Actor,
        days: Option<i64>,
    ) -> DomainResult<OperatorPerformanceReport> {
        authorize(actor, Action::ViewOperatorPerformance, None)?;

        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS).max(0);
        let since = Utc::now() - Duration::days(days);

        let calls = self.calls.list_calls_since(since, None).await?;

        let call_ids: Vec<i32> = calls.iter().map(|c| c.id).collect();
        let evaluations = self.evaluations.list_evaluations_for_calls(&call_ids).await?;

        let mut operator_ids: Vec<i32> = calls.iter().map(|c| c.operator_id).collect();
        operator_ids.sort_unstable();
        operator_ids.dedup();
        let operators = self.users.get_users_by_ids(&operator_ids).await?;

        Ok(OperatorPerformanceReport {
            period_days: days,
            operators: operator_performance(&operators, &calls, &evaluations),
        })
    }

    /// The most recently created calls and evaluations, newest first.
    pub async fn recent_activity(
        &self,
        actor: &Actor,
        limit: Option<u64>,
    ) -> DomainResult<RecentActivity> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, 100);
        let scope = Self::scope(actor);

        let recent_calls = self.calls.recent_calls(limit, scope).await?;
        let recent_evaluations = self.evaluations.recent_evaluations(limit, scope).await?;

        Ok(RecentActivity {
            recent_calls,
            recent_evaluations,
        })
    }
}
