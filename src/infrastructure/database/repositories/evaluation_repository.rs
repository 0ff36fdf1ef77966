use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::{
    DomainResult, Evaluation, EvaluationFilter, EvaluationRepositoryInterface, EvaluationUpdate,
    NewEvaluation,
};
use crate::infrastructure::database::entities::{call, evaluation};
use crate::shared::PaginatedResult;

use super::internal;

pub struct EvaluationRepository {
    db: DatabaseConnection,
}

impl EvaluationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: evaluation::Model) -> Evaluation {
    Evaluation {
        id: model.id,
        call_id: model.call_id,
        evaluator_id: model.evaluator_id,
        greeting_score: model.greeting_score,
        communication_score: model.communication_score,
        problem_solving_score: model.problem_solving_score,
        empathy_score: model.empathy_score,
        procedure_score: model.procedure_score,
        closing_score: model.closing_score,
        overall_score: model.overall_score,
        positive_points: model.positive_points,
        improvement_points: model.improvement_points,
        general_comments: model.general_comments,
        requires_coaching: model.requires_coaching,
        is_exemplary: model.is_exemplary,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Scope an evaluation query to the calls of one operator. The ownership
/// join is explicit here rather than hidden behind lazy relations.
fn scope_to_operator(
    query: sea_orm::Select<evaluation::Entity>,
    operator_id: i32,
) -> sea_orm::Select<evaluation::Entity> {
    query
        .join(JoinType::InnerJoin, evaluation::Relation::Call.def())
        .filter(call::Column::OperatorId.eq(operator_id))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EvaluationRepositoryInterface for EvaluationRepository {
    async fn create_evaluation(&self, new: NewEvaluation) -> DomainResult<Evaluation> {
        let now = Utc::now();

        let model = evaluation::ActiveModel {
            call_id: Set(new.call_id),
            evaluator_id: Set(new.evaluator_id),
            greeting_score: Set(new.greeting_score),
            communication_score: Set(new.communication_score),
            problem_solving_score: Set(new.problem_solving_score),
            empathy_score: Set(new.empathy_score),
            procedure_score: Set(new.procedure_score),
            closing_score: Set(new.closing_score),
            overall_score: Set(new.overall_score),
            positive_points: Set(new.positive_points),
            improvement_points: Set(new.improvement_points),
            general_comments: Set(new.general_comments),
            requires_coaching: Set(new.requires_coaching),
            is_exemplary: Set(new.is_exemplary),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&self.db).await.map_err(internal)?;
        Ok(to_domain(created))
    }

    async fn list_evaluations(
        &self,
        filter: EvaluationFilter,
    ) -> DomainResult<PaginatedResult<Evaluation>> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(20).clamp(1, 100);

        let mut query =
            evaluation::Entity::find().order_by_desc(evaluation::Column::CreatedAt);

        if let Some(call_id) = filter.call_id {
            query = query.filter(evaluation::Column::CallId.eq(call_id));
        }
        if let Some(evaluator_id) = filter.evaluator_id {
            query = query.filter(evaluation::Column::EvaluatorId.eq(evaluator_id));
        }
        if let Some(requires_coaching) = filter.requires_coaching {
            query = query.filter(evaluation::Column::RequiresCoaching.eq(requires_coaching));
        }
        if let Some(is_exemplary) = filter.is_exemplary {
            query = query.filter(evaluation::Column::IsExemplary.eq(is_exemplary));
        }
        if let Some(operator_id) = filter.operator_id {
            query = scope_to_operator(query, operator_id);
        }

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let evaluations = query
            .offset((page as u64 - 1) * per_page as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(PaginatedResult::new(
            evaluations.into_iter().map(to_domain).collect(),
            total,
            page,
            per_page,
        ))
    }

    async fn get_evaluation_by_id(&self, id: i32) -> DomainResult<Option<Evaluation>> {
        let found = evaluation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(found.map(to_domain))
    }

    async fn list_evaluations_for_call(&self, call_id: i32) -> DomainResult<Vec<Evaluation>> {
        let evaluations = evaluation::Entity::find()
            .filter(evaluation::Column::CallId.eq(call_id))
            .order_by_desc(evaluation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(evaluations.into_iter().map(to_domain).collect())
    }

    async fn list_evaluations_for_calls(
        &self,
        call_ids: &[i32],
    ) -> DomainResult<Vec<Evaluation>> {
        if call_ids.is_empty() {
            return Ok(Vec::new());
        }

        let evaluations = evaluation::Entity::find()
            .filter(evaluation::Column::CallId.is_in(call_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(evaluations.into_iter().map(to_domain).collect())
    }

    async fn list_evaluations_since(
        &self,
        since: DateTime<Utc>,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Evaluation>> {
        let mut query =
            evaluation::Entity::find().filter(evaluation::Column::CreatedAt.gte(since));

        if let Some(operator_id) = operator_id {
            query = scope_to_operator(query, operator_id);
        }

        let evaluations = query.all(&self.db).await.map_err(internal)?;
        Ok(evaluations.into_iter().map(to_domain).collect())
    }

    async fn recent_evaluations(
        &self,
        limit: u64,
        operator_id: Option<i32>,
    ) -> DomainResult<Vec<Evaluation>> {
        let mut query = evaluation::Entity::find()
            .order_by_desc(evaluation::Column::CreatedAt)
            .limit(limit);

        if let Some(operator_id) = operator_id {
            query = scope_to_operator(query, operator_id);
        }

        let evaluations = query.all(&self.db).await.map_err(internal)?;
        Ok(evaluations.into_iter().map(to_domain).collect())
    }

    async fn update_evaluation(
        &self,
        id: i32,
        update: EvaluationUpdate,
    ) -> DomainResult<Option<Evaluation>> {
        let Some(existing) = evaluation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };

        // The service has already merged the patch; apply every field.
        let mut active: evaluation::ActiveModel = existing.into();
        active.greeting_score = Set(update.greeting_score);
        active.communication_score = Set(update.communication_score);
        active.problem_solving_score = Set(update.problem_solving_score);
        active.empathy_score = Set(update.empathy_score);
        active.procedure_score = Set(update.procedure_score);
        active.closing_score = Set(update.closing_score);
        active.overall_score = Set(update.overall_score);
        active.positive_points = Set(update.positive_points);
        active.improvement_points = Set(update.improvement_points);
        active.general_comments = Set(update.general_comments);
        active.requires_coaching = Set(update.requires_coaching);
        active.is_exemplary = Set(update.is_exemplary);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(internal)?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete_evaluation(&self, id: i32) -> DomainResult<bool> {
        let result = evaluation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected > 0)
    }
}
