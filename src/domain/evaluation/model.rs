use chrono::{DateTime, Utc};

/// A rubric evaluation of one call by one evaluator.
///
/// `overall_score` is derived from the six sub-scores and recomputed on
/// every write that touches any of them; it is never carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
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
