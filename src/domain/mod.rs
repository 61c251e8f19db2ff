//! Core business entities, value types and repository interfaces.

pub mod booking;
pub mod fee;
pub mod repositories;
pub mod reservation;
pub mod schedule;
pub mod service;
pub mod slot;
pub mod time_window;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus};
pub use fee::{cancellation_fee, fee_percent_for, refund, CancellationInitiator, FeeQuote};
pub use repositories::DomainResult;
pub use reservation::{ReservationStatus, ReservationStore, SlotReservation};
pub use schedule::{DaySchedule, ProviderScheduleRepository, WeeklySchedule, WorkingHours};
pub use service::{Service, ServiceRepository};
pub use slot::{OccupancyStats, Slot, SlotCache, SlotCacheKey};
pub use time_window::{hours_until, TimeWindow};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
