//! Schedule aggregate
//!
//! Contains the weekly schedule entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::{DaySchedule, WeeklySchedule, WorkingHours};
pub use repository::ProviderScheduleRepository;
