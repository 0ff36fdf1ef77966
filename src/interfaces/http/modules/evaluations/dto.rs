//! Evaluation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Evaluation;
use crate::interfaces::http::common::round2;

use super::super::users::dto::{default_page, default_per_page};

/// Evaluation API representation. The overall score is rounded to two
/// decimals here; the stored value stays unrounded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluationDto {
    pub id: i32,
    pub call_id: i32,
    pub evaluator_id: i32,
    pub greeting_score: Option<i32>,
    pub communication_score: Option<i32>,
    pub problem_solving_score: Option<i32>,
    pub empathy_score: Option<i32>,
    pub procedure_score: Option<i32>,
    pub closing_score: Option<i32>,
    pub overall_score: f64,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub general_comments: Option<String>,
    pub requires_coaching: bool,
    pub is_exemplary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationDto {
    fn from(e: Evaluation) -> Self {
        Self {
            id: e.id,
            call_id: e.call_id,
            evaluator_id: e.evaluator_id,
            greeting_score: e.greeting_score,
            communication_score: e.communication_score,
            problem_solving_score: e.problem_solving_score,
            empathy_score: e.empathy_score,
            procedure_score: e.procedure_score,
            closing_score: e.closing_score,
            overall_score: round2(e.overall_score),
            positive_points: e.positive_points,
            improvement_points: e.improvement_points,
            general_comments: e.general_comments,
            requires_coaching: e.requires_coaching,
            is_exemplary: e.is_exemplary,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Create evaluation request. The evaluator is the caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluationRequest {
    pub call_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub greeting_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub communication_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub problem_solving_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub empathy_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub procedure_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub closing_score: Option<i32>,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub general_comments: Option<String>,
    #[serde(default)]
    pub requires_coaching: bool,
    #[serde(default)]
    pub is_exemplary: bool,
}

/// Update evaluation request; absent fields are left untouched and the
/// overall score is recomputed from the resulting sub-scores
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEvaluationRequest {
    #[validate(range(min = 1, max = 5))]
    pub greeting_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub communication_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub problem_solving_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub empathy_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub procedure_score: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub closing_score: Option<i32>,
    pub positive_points: Option<String>,
    pub improvement_points: Option<String>,
    pub general_comments: Option<String>,
    pub requires_coaching: Option<bool>,
    pub is_exemplary: Option<bool>,
}

/// List evaluations query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListEvaluationsParams {
    pub call_id: Option<i32>,
    pub evaluator_id: Option<i32>,
    /// Filter through the parent call's operator
    pub operator_id: Option<i32>,
    pub requires_coaching: Option<bool>,
    pub is_exemplary: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}
