//! Call entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Call status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CallStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl Default for CallStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Call priority
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CallPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl Default for CallPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Call model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub protocol: String,
    pub operator_id: i32,
    pub customer_name: String,
    #[sea_orm(nullable)]
    pub customer_phone: Option<String>,
    #[sea_orm(nullable)]
    pub customer_email: Option<String>,
    pub subject: String,
    #[sea_orm(nullable, column_type = "Text")]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub category: Option<String>,
    pub priority: CallPriority,
    pub status: CallStatus,
    #[sea_orm(nullable)]
    pub duration_seconds: Option<i32>,
    #[sea_orm(nullable)]
    pub recording_url: Option<String>,
    #[sea_orm(nullable, column_type = "Text")]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    #[sea_orm(nullable)]
    pub closed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OperatorId",
        to = "super::user::Column::Id"
    )]
    Operator,

    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
