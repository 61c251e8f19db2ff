//! Application services
//!
//! Business logic orchestrating the domain entities against the
//! repository and cache collaborators.

pub mod bookings;
pub mod overlap;
pub mod reservations;
pub mod schedule_resolver;
pub mod slots;

pub use bookings::{BookingService, CancellationOutcome};
pub use overlap::OverlapChecker;
pub use reservations::{ReservationManager, ReservationSweeper};
pub use schedule_resolver::{ScheduleResolver, WorkingDay};
pub use slots::SlotGenerator;
