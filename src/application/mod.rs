//! Business logic and use cases.

pub mod services;

pub use services::{
    BookingService, CancellationOutcome, OverlapChecker, ReservationManager, ReservationSweeper,
    ScheduleResolver, SlotGenerator, WorkingDay,
};
