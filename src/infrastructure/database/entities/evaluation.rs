//! Evaluation entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Evaluation model. Sub-scores are 1-5 or NULL; `overall_score` is the
/// mean of the non-NULL sub-scores, maintained by the evaluation service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub call_id: i32,
    pub evaluator_id: i32,
    #[sea_orm(nullable)]
    pub greeting_score: Option<i32>,
    #[sea_orm(nullable)]
    pub communication_score: Option<i32>,
    #[sea_orm(nullable)]
    pub problem_solving_score: Option<i32>,
    #[sea_orm(nullable)]
    pub empathy_score: Option<i32>,
    #[sea_orm(nullable)]
    pub procedure_score: Option<i32>,
    #[sea_orm(nullable)]
    pub closing_score: Option<i32>,
    #[sea_orm(column_type = "Double")]
    pub overall_score: f64,
    #[sea_orm(nullable, column_type = "Text")]
    pub positive_points: Option<String>,
    #[sea_orm(nullable, column_type = "Text")]
    pub improvement_points: Option<String>,
    #[sea_orm(nullable, column_type = "Text")]
    pub general_comments: Option<String>,
    pub requires_coaching: bool,
    pub is_exemplary: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::call::Entity",
        from = "Column::CallId",
        to = "super::call::Column::Id"
    )]
    Call,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EvaluatorId",
        to = "super::user::Column::Id"
    )]
    Evaluator,
}

impl Related<super::call::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Call.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
