use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    Call, CallChanges, CallFilter, CallPriority, CallRepositoryInterface, CallStatus,
    DomainResult, NewCall,
};
use crate::infrastructure::database::entities::call;
use crate::shared::PaginatedResult;

use super::{conflict_or_internal, internal};

pub struct CallRepository {
    db: DatabaseConnection,
}

impl CallRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: call::CallStatus) -> CallStatus {
    match status {
        call::CallStatus::Open => CallStatus::Open,
        call::CallStatus::InProgress => CallStatus::InProgress,
        call::CallStatus::Resolved => CallStatus::Resolved,
        call::CallStatus::Closed => CallStatus::Closed,
    }
}

fn domain_status_to_entity(status: CallStatus) -> call::CallStatus {
    match status {
        CallStatus::Open => call::CallStatus::Open,
        CallStatus::InProgress => call::CallStatus::InProgress,
        CallStatus::Resolved => call::CallStatus::Resolved,
        CallStatus::Closed => call::CallStatus::Closed,
    }
}

fn entity_priority_to_domain(priority: call::CallPriority) -> CallPriority {
    match priority {
        call::CallPriority::Low => CallPriority::Low,
        call::CallPriority::Medium => CallPriority::Medium,
        call::CallPriority::High => CallPriority::High,
        call::CallPriority::Urgent => CallPriority::Urgent,
    }
}

fn domain_priority_to_entity(priority: CallPriority) -> call::CallPriority {
    match priority {
        CallPriority::Low => call::CallPriority::Low,
        CallPriority::Medium => call::CallPriority::Medium,
        CallPriority::High => call::CallPriority::High,
        CallPriority::Urgent => call::CallPriority::Urgent,
    }
}

fn to_domain(model: call::Model) -> Call {
    Call {
        id: model.id,
        protocol: model.protocol,
        operator_id: model.operator_id,
        customer_name: model.customer_name,
        customer_phone: model.customer_phone,
        customer_email: model.customer_email,
        subject: model.subject,
        description: model.description,
        category: model.category,
        priority: entity_priority_to_domain(model.priority),
        status: entity_status_to_domain(model.status),
        duration_seconds: model.duration_seconds,
        recording_url: model.recording_url,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
        closed_at: model.closed_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CallRepositoryInterface for CallRepository {
    async fn create_call(&self, new: NewCall) -> DomainResult<Call> {
        let now = Utc::now();

        let model = call::ActiveModel {
            protocol: Set(new.protocol),
            operator_id: Set(new.operator_id),
            customer_name: Set(new.customer_name),
            customer_phone: Set(new.customer_phone),
            customer_email: Set(new.customer_email),
            subject: Set(new.subject),
            description: Set(new.description),
            category: Set(new.category),
            priority: Set(domain_priority_to_entity(new.priority)),
            status: Set(domain_status_to_entity(new.status)),
            duration_seconds: Set(new.duration_seconds),
            recording_url: Set(new.recording_url),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            closed_at: Set(None),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, "Call protocol already exists"))?;

        Ok(to_domain(created))
    }

    async fn list_calls(&self, filter: CallFilter) -> DomainResult<PaginatedResult<Call>> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(20).clamp(1, 100);

        let mut query = call::Entity::find().order_by_desc(call::Column::CreatedAt);

        if let Some(operator_id) = filter.operator_id {
            query = query.filter(call::Column::OperatorId.eq(operator_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(call::Column::Status.eq(domain_status_to_entity(status)));
        }
        if let Some(ref category) = filter.category {
            query = query.filter(call::Column::Category.eq(category.clone()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(call::Column::Priority.eq(domain_priority_to_entity(priority)));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(call::Column::CreatedAt.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(call::Column::CreatedAt.lte(date_to));
        }

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let calls = query
            .offset((page as u64 - 1) * per_page as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(PaginatedResult::new(
            calls.into_iter().map(to_domain).collect(),
            total,
            page,
            per_page,
        ))
    }

    async fn get_call_by_id(&self, id: i32) -> DomainResult<Option<Call>> {
        let found = call::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(found.map(to_domain))
    }

    async fn update_call(&self, id: i32, changes: CallChanges) -> DomainResult<Option<Call>> {
        let Some(existing) = call::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };

        let mut active: call::ActiveModel = existing.into();
        active.updated_at = Set(Utc::now());

        if let Some(customer_name) = changes.customer_name {
            active.customer_name = Set(customer_name);
        }
        if let Some(customer_phone) = changes.customer_phone {
            active.customer_phone = Set(Some(customer_phone));
        }
        if let Some(customer_email) = changes.customer_email {
            active.customer_email = Set(Some(customer_email));
        }
        if let Some(subject) = changes.subject {
            active.subject = Set(subject);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = changes.category {
            active.category = Set(Some(category));
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(domain_priority_to_entity(priority));
        }
        if let Some(status) = changes.status {
            active.status = Set(domain_status_to_entity(status));
        }
        if let Some(duration_seconds) = changes.duration_seconds {
            active.duration_seconds = Set(Some(duration_seconds));
        }
        if let Some(recording_url) = changes.recording_url {
            active.recording_url = Set(Some(recording_url));
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(closed_at) = changes.closed_at {
            active.closed_at = Set(Some(closed_at));
        }

        let updated = active.update(&self.db).await.map_err(internal)?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete_call(&self, id: i32) -> DomainResult<bool> {
        let result = call::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected > 0)
    }

    async fn list_calls_since(
        &self,
        since: DateTime<Utc>,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Call>> {
        let mut query = call::Entity::find().filter(call::Column::CreatedAt.gte(since));

        if let Some(operator_id) = operator_id {
            query = query.filter(call::Column::OperatorId.eq(operator_id));
        }

        let calls = query.all(&self.db).await.map_err(internal)?;
        Ok(calls.into_iter().map(to_domain).collect())
    }

    async fn recent_calls(
        &self,
        limit: u64,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Call>> {
        let mut query = call::Entity::find()
            .order_by_desc(call::Column::CreatedAt)
            .limit(limit);

        if let Some(operator_id) = operator_id {
            query = query.filter(call::Column::OperatorId.eq(operator_id));
        }

        let calls = query.all(&self.db).await.map_err(internal)?;
        Ok(calls.into_iter().map(to_domain).collect())
    }
}
