//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_provider_schedules;
mod m20260101_000002_create_services;
mod m20260101_000003_create_bookings;
mod m20260101_000004_create_slot_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_provider_schedules::Migration),
            Box::new(m20260101_000002_create_services::Migration),
            Box::new(m20260101_000003_create_bookings::Migration),
            Box::new(m20260101_000004_create_slot_reservations::Migration),
        ]
    }
}
