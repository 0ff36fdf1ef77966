use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Call, CallChanges, CallFilter, NewCall};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait CallRepositoryInterface: Send + Sync {
    /// Insert a new call. A protocol collision surfaces as `Conflict`
    /// and is not retried.
    async fn create_call(&self, call: NewCall) -> DomainResult<Call>;

    async fn list_calls(&self, filter: CallFilter) -> DomainResult<PaginatedResult<Call>>;
    async fn get_call_by_id(&self, id: i32) -> DomainResult<Option<Call>>;

    async fn update_call(&self, id: i32, changes: CallChanges) -> DomainResult<Option<Call>>;

    /// Delete a call; its evaluations go with it (FK cascade).
    /// Returns `false` when no such call exists.
    async fn delete_call(&self, id: i32) -> DomainResult<bool>;

    /// Calls created at or after `since`, optionally scoped to one
    /// operator. Used by the dashboard aggregator.
    async fn list_calls_since(
        &self,
        since: DateTime<Utc>,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Call>>;

    /// The most recently created calls, newest first.
    async fn recent_calls(&self, limit: u64, operator_id: Option<i32>)
        -> DomainResult<Vec<Call>>;
}
