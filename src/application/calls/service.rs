//! Call service — call lifecycle and scoped access.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    authorize, Action, Actor, Call, CallChanges, CallFilter, CallPriority,
    CallRepositoryInterface, CallStatus, DomainError, DomainResult, Evaluation,
    EvaluationRepositoryInterface, NewCall, UserRole,
};
use crate::shared::PaginatedResult;

/// Input for logging a new call. `operator_id` defaults to the actor.
#[derive(Debug, Clone)]
pub struct CreateCall {
    pub operator_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub subject: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<CallPriority>,
    pub status: Option<CallStatus>,
    pub duration_seconds: Option<i32>,
    pub recording_url: Option<String>,
    pub notes: Option<String>,
}

pub struct CallService<C, E>
where
    C: CallRepositoryInterface,
    E: EvaluationRepositoryInterface,
{
    calls: Arc<C>,
    evaluations: Arc<E>,
}

impl<C, E> CallService<C, E>
where
    C: CallRepositoryInterface,
    E: EvaluationRepositoryInterface,
{
    pub fn new(calls: Arc<C>, evaluations: Arc<E>) -> Self {
        Self { calls, evaluations }
    }

    /// Unique human-readable call identifier: UTC timestamp plus a random
    /// suffix. A store-level collision surfaces as Conflict and is not
    /// retried.
    fn generate_protocol() -> String {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S");
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase();
        format!("CALL-{}-{}", timestamp, suffix)
    }

    pub async fn create_call(&self, actor: &Actor, input: CreateCall) -> DomainResult<Call> {
        authorize(actor, Action::CreateCall, None)?;

        if input.customer_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Customer name is required".into()));
        }
        if input.subject.trim().is_empty() {
            return Err(DomainError::InvalidInput("Subject is required".into()));
        }

        let call = self
            .calls
            .create_call(NewCall {
                protocol: Self::generate_protocol(),
                operator_id: input.operator_id.unwrap_or(actor.id),
                customer_name: input.customer_name,
                customer_phone: input.customer_phone,
                customer_email: input.customer_email,
                subject: input.subject,
                description: input.description,
                category: input.category,
                priority: input.priority.unwrap_or_default(),
                status: input.status.unwrap_or_default(),
                duration_seconds: input.duration_seconds,
                recording_url: input.recording_url,
                notes: input.notes,
            })
            .await?;

        info!(call_id = call.id, protocol = %call.protocol, "Call logged");
        Ok(call)
    }

    /// Scoped listing: operators only ever see their own calls, whatever
    /// filter they pass.
    pub async fn list_calls(
        &self,
        actor: &Actor,
        mut filter: CallFilter,
    ) -> DomainResult<PaginatedResult<Call>> {
        if actor.role == UserRole::Operator {
            filter.operator_id = Some(actor.id);
        }
        self.calls.list_calls(filter).await
    }

    /// One call plus its evaluations.
    pub async fn get_call(&self, actor: &Actor, id: i32) -> DomainResult<(Call, Vec<Evaluation>)> {
        let call = self
            .calls
            .get_call_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))?;

        authorize(actor, Action::ReadCall, Some(call.operator_id))?;

        let evaluations = self.evaluations.list_evaluations_for_call(id).await?;
        Ok((call, evaluations))
    }

    pub async fn update_call(
        &self,
        actor: &Actor,
        id: i32,
        mut changes: CallChanges,
    ) -> DomainResult<Call> {
        let call = self
            .calls
            .get_call_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))?;

        authorize(actor, Action::UpdateCall, Some(call.operator_id))?;

        // The closed stamp is derived here, never taken from the caller.
        changes.closed_at = call.closed_at_after(changes.status, Utc::now());

        self.calls
            .update_call(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))
    }

    /// Delete a call and, through the store's cascade, its evaluations.
    pub async fn delete_call(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        authorize(actor, Action::DeleteCall, None)?;

        if !self.calls.delete_call(id).await? {
            return Err(DomainError::not_found("Call", id));
        }

        info!(call_id = id, "Call deleted");
        Ok(())
    }
}
