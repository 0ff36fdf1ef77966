//! Evaluation service — rubric evaluations of calls.

use std::sync::Arc;

use tracing::info;

use super::scoring::SubScores;
use crate::domain::{
    authorize, Action, Actor, CallRepositoryInterface, DomainError, DomainResult, Evaluation,
    EvaluationFilter, EvaluationRepositoryInterface, EvaluationUpdate, NewEvaluation, UserRole,
};
use crate::shared::PaginatedResult;

/// Input for a new evaluation. The evaluator is always the actor.
#[derive(Debug, Clone)]
pub struct CreateEvaluation {
    pub call_id: i32,
    pub scores: SubScores,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub general_comments: Option<String>,
    pub requires_coaching: bool,
    pub is_exemplary: bool,
}

/// Partial update for an evaluation. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EvaluationPatch {
    pub greeting_score: Option<i32>,
    pub communication_score: Option<i32>,
    pub problem_solving_score: Option<i32>,
    pub empathy_score: Option<i32>,
    pub procedure_score: Option<i32>,
    pub closing_score: Option<i32>,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub general_comments: Option<String>,
    pub requires_coaching: Option<bool>,
    pub is_exemplary: Option<bool>,
}

pub struct EvaluationService<E, C>
where
    E: EvaluationRepositoryInterface,
    C: CallRepositoryInterface,
{
    evaluations: Arc<E>,
    calls: Arc<C>,
}

impl<E, C> EvaluationService<E, C>
where
    E: EvaluationRepositoryInterface,
    C: CallRepositoryInterface,
{
    pub fn new(evaluations: Arc<E>, calls: Arc<C>) -> Self {
        Self { evaluations, calls }
    }

    pub async fn create_evaluation(
        &self,
        actor: &Actor,
        input: CreateEvaluation,
    ) -> DomainResult<Evaluation> {
        authorize(actor, Action::CreateEvaluation, None)?;

        self.calls
            .get_call_by_id(input.call_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", input.call_id))?;

        input.scores.validate()?;

        let evaluation = self
            .evaluations
            .create_evaluation(NewEvaluation {
                call_id: input.call_id,
                evaluator_id: actor.id,
                greeting_score: input.scores.greeting,
                communication_score: input.scores.communication,
                problem_solving_score: input.scores.problem_solving,
                empathy_score: input.scores.empathy,
                procedure_score: input.scores.procedure,
                closing_score: input.scores.closing,
                overall_score: input.scores.overall(),
                positive_points: input.positive_points,
                improvement_points: input.improvement_points,
                general_comments: input.general_comments,
                requires_coaching: input.requires_coaching,
                is_exemplary: input.is_exemplary,
            })
            .await?;

        info!(
            evaluation_id = evaluation.id,
            call_id = evaluation.call_id,
            evaluator_id = evaluation.evaluator_id,
            "Evaluation created"
        );
        Ok(evaluation)
    }

    /// Scoped listing: operators only ever see evaluations of their own
    /// calls, whatever filter they pass.
    pub async fn list_evaluations(
        &self,
        actor: &Actor,
        mut filter: EvaluationFilter,
    ) -> DomainResult<PaginatedResult<Evaluation>> {
        if actor.role == UserRole::Operator {
            filter.operator_id = Some(actor.id);
        }
        self.evaluations.list_evaluations(filter).await
    }

    pub async fn get_evaluation(&self, actor: &Actor, id: i32) -> DomainResult<Evaluation> {
        let evaluation = self
            .evaluations
            .get_evaluation_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Evaluation", id))?;

        // Read scope goes through the parent call's operator.
        let call = self
            .calls
            .get_call_by_id(evaluation.call_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", evaluation.call_id))?;

        authorize(actor, Action::ReadEvaluation, Some(call.operator_id))?;

        Ok(evaluation)
    }

    /// Merge a patch over the stored evaluation and recompute the overall
    /// score from the resulting sub-scores.
    pub async fn update_evaluation(
        &self,
        actor: &Actor,
        id: i32,
        patch: EvaluationPatch,
    ) -> DomainResult<Evaluation> {
        let existing = self
            .evaluations
            .get_evaluation_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Evaluation", id))?;

        authorize(actor, Action::UpdateEvaluation, Some(existing.evaluator_id))?;

        let merged = SubScores {
            greeting: patch.greeting_score.or(existing.greeting_score),
            communication: patch.communication_score.or(existing.communication_score),
            problem_solving: patch.problem_solving_score.or(existing.problem_solving_score),
            empathy: patch.empathy_score.or(existing.empathy_score),
            procedure: patch.procedure_score.or(existing.procedure_score),
            closing: patch.closing_score.or(existing.closing_score),
        };
        merged.validate()?;

        let updated = self
            .evaluations
            .update_evaluation(
                id,
                EvaluationUpdate {
                    greeting_score: merged.greeting,
                    communication_score: merged.communication,
                    problem_solving_score: merged.problem_solving,
                    empathy_score: merged.empathy,
                    procedure_score: merged.procedure,
                    closing_score: merged.closing,
                    overall_score: merged.overall(),
                    positive_points: patch.positive_points.or(existing.positive_points),
                    improvement_points: patch
                        .improvement_points
                        .or(existing.improvement_points),
                    general_comments: patch.general_comments.or(existing.general_comments),
                    requires_coaching: patch
                        .requires_coaching
                        .unwrap_or(existing.requires_coaching),
                    is_exemplary: patch.is_exemplary.unwrap_or(existing.is_exemplary),
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("Evaluation", id))?;

        Ok(updated)
    }

    pub async fn delete_evaluation(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        authorize(actor, Action::DeleteEvaluation, None)?;

        if !self.evaluations.delete_evaluation(id).await? {
            return Err(DomainError::not_found("Evaluation", id));
        }

        info!(evaluation_id = id, "Evaluation deleted");
        Ok(())
    }
}
