//! Create slot_reservations table
//!
//! Short-lived holds with TTL tracking; the expiry sweep scans the
//! reserved_until index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SlotReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SlotReservations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::ProviderId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::CustomerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SlotReservations::Date).date().not_null())
                    .col(
                        ColumnDef::new(SlotReservations::StartTime)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::ReservedUntil)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::Status)
                            .string()
                            .not_null()
                            .default("Reserved"),
                    )
                    .col(
                        ColumnDef::new(SlotReservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_provider_date")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::ProviderId)
                    .col(SlotReservations::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_status")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slot_reservations_reserved_until")
                    .table(SlotReservations::Table)
                    .col(SlotReservations::ReservedUntil)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SlotReservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SlotReservations {
    Table,
    Id,
    ProviderId,
    CustomerId,
    Date,
    StartTime,
    DurationMinutes,
    ReservedUntil,
    Status,
    CreatedAt,
}
