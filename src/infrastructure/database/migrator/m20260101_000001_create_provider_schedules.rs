//! Create provider_schedules table
//!
//! One row per provider per working day of the week.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderSchedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProviderSchedules::ProviderId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderSchedules::DayOfWeek)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderSchedules::IsWorkingDay)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ProviderSchedules::WorkStart)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderSchedules::WorkEnd)
                            .time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProviderSchedules::BreakStart).time())
                    .col(ColumnDef::new(ProviderSchedules::BreakEnd).time())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_provider_schedules_provider")
                    .table(ProviderSchedules::Table)
                    .col(ProviderSchedules::ProviderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderSchedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProviderSchedules {
    Table,
    Id,
    ProviderId,
    DayOfWeek,
    IsWorkingDay,
    WorkStart,
    WorkEnd,
    BreakStart,
    BreakEnd,
}
