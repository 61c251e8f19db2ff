//! SeaORM repository implementations

pub mod booking_repository;
pub mod reservation_repository;
pub mod schedule_repository;
pub mod service_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use reservation_repository::SeaOrmReservationStore;
pub use schedule_repository::SeaOrmProviderScheduleRepository;
pub use service_repository::SeaOrmServiceRepository;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, DomainResult};

/// Map a database error into the domain taxonomy unchanged in content;
/// retries belong to the calling layer.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Money is stored in the smallest currency unit (e.g., cents).
pub(crate) fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub(crate) fn decimal_to_cents(value: Decimal) -> DomainResult<i64> {
    (value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("amount {} out of range", value)))
}
