//! Create calls table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Calls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Calls::Protocol)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Calls::OperatorId).integer().not_null())
                    .col(ColumnDef::new(Calls::CustomerName).string_len(200).not_null())
                    .col(ColumnDef::new(Calls::CustomerPhone).string_len(20))
                    .col(ColumnDef::new(Calls::CustomerEmail).string_len(120))
                    .col(ColumnDef::new(Calls::Subject).string_len(200).not_null())
                    .col(ColumnDef::new(Calls::Description).text())
                    .col(ColumnDef::new(Calls::Category).string_len(50))
                    .col(
                        ColumnDef::new(Calls::Priority)
                            .string_len(20)
                            .not_null()
                            .default("medium"),
                    )
                    .col(
                        ColumnDef::new(Calls::Status)
                            .string_len(20)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Calls::DurationSeconds).integer())
                    .col(ColumnDef::new(Calls::RecordingUrl).string_len(500))
                    .col(ColumnDef::new(Calls::Notes).text())
                    .col(
                        ColumnDef::new(Calls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Calls::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Calls::ClosedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_calls_operator")
                            .from(Calls::Table, Calls::OperatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_calls_operator")
                    .table(Calls::Table)
                    .col(Calls::OperatorId)
                    .to_owned(),
            )
            .await?;

        // Dashboard windows filter on creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_calls_created_at")
                    .table(Calls::Table)
                    .col(Calls::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Calls::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Calls {
    Table,
    Id,
    Protocol,
    OperatorId,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    Subject,
    Description,
    Category,
    Priority,
    Status,
    DurationSeconds,
    RecordingUrl,
    Notes,
    CreatedAt,
    UpdatedAt,
    ClosedAt,
}
