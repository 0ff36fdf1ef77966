use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Evaluation, EvaluationFilter, EvaluationUpdate, NewEvaluation};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait EvaluationRepositoryInterface: Send + Sync {
    async fn create_evaluation(&self, evaluation: NewEvaluation) -> DomainResult<Evaluation>;

    async fn list_evaluations(
        &self,
        filter: EvaluationFilter,
    ) -> DomainResult<PaginatedResult<Evaluation>>;
    async fn get_evaluation_by_id(&self, id: i32) -> DomainResult<Option<Evaluation>>;

    /// All evaluations of one call, for the call detail view.
    async fn list_evaluations_for_call(&self, call_id: i32) -> DomainResult<Vec<Evaluation>>;

    /// Evaluations of the given calls, for per-operator aggregation.
    async fn list_evaluations_for_calls(&self, call_ids: &[i32])
        -> DomainResult<Vec<Evaluation>>;

    /// Evaluations created at or after `since`, optionally scoped through
    /// the parent call's operator.
    async fn list_evaluations_since(
        &self,
        since: DateTime<Utc>,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Evaluation>>;

    /// The most recently created evaluations, newest first, scoped like
    /// [`list_evaluations_since`](Self::list_evaluations_since).
    async fn recent_evaluations(
        &self,
        limit: u64,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Evaluation>>;

    async fn update_evaluation(
        &self,
        id: i32,
        update: EvaluationUpdate,
    ) -> DomainResult<Option<Evaluation>>;

    /// Returns `false` when no such evaluation exists.
    async fn delete_evaluation(&self, id: i32) -> DomainResult<bool>;
}
