//! Create evaluations table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000002_create_calls::Calls;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::CallId).integer().not_null())
                    .col(ColumnDef::new(Evaluations::EvaluatorId).integer().not_null())
                    .col(ColumnDef::new(Evaluations::GreetingScore).integer())
                    .col(ColumnDef::new(Evaluations::CommunicationScore).integer())
                    .col(ColumnDef::new(Evaluations::ProblemSolvingScore).integer())
                    .col(ColumnDef::new(Evaluations::EmpathyScore).integer())
                    .col(ColumnDef::new(Evaluations::ProcedureScore).integer())
                    .col(ColumnDef::new(Evaluations::ClosingScore).integer())
                    .col(
                        ColumnDef::new(Evaluations::OverallScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Evaluations::PositivePoints).text())
                    .col(ColumnDef::new(Evaluations::ImprovementPoints).text())
                    .col(ColumnDef::new(Evaluations::GeneralComments).text())
                    .col(
                        ColumnDef::new(Evaluations::RequiresCoaching)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluations::IsExemplary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Deleting a call removes its evaluations with it
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_call")
                            .from(Evaluations::Table, Evaluations::CallId)
                            .to(Calls::Table, Calls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_evaluator")
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_call")
                    .table(Evaluations::Table)
                    .col(Evaluations::CallId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_created_at")
                    .table(Evaluations::Table)
                    .col(Evaluations::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Evaluations {
    Table,
    Id,
    CallId,
    EvaluatorId,
    GreetingScore,
    CommunicationScore,
    ProblemSolvingScore,
    EmpathyScore,
    ProcedureScore,
    ClosingScore,
    OverallScore,
    PositivePoints,
    ImprovementPoints,
    GeneralComments,
    RequiresCoaching,
    IsExemplary,
    CreatedAt,
    UpdatedAt,
}
