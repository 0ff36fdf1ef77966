/// Repository-facing record for a new evaluation. `overall_score` is
/// computed by the evaluation service from the sub-scores.
#[derive(Debug, Clone)]
pub struct NewEvaluation {
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
}

/// Fully resolved state for an evaluation update. The service merges the
/// caller's patch over the stored row and recomputes `overall_score`;
/// repositories apply every field as-is.
#[derive(Debug, Clone)]
pub struct EvaluationUpdate {
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
}

/// Listing filters for evaluations. `operator_id` filters through the
/// parent call's operator.
#[derive(Debug, Clone, Default)]
pub struct EvaluationFilter {
    pub call_id: Option<i32>,
    pub evaluator_id: Option<i32>,
    pub operator_id: Option<i32>,
    pub requires_coaching: Option<bool>,
    pub is_exemplary: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
