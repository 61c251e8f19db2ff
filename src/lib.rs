//! # Spa Booking Availability Engine
//!
//! Appointment availability and slot-reservation engine for a
//! service-booking marketplace: break-aware slot generation over a
//! provider's weekly schedule, conflict detection, short-lived slot holds
//! with an atomic store-side guard, and time-tiered cancellation fees.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value types and repository traits
//! - **application**: Business logic and use cases (slot generation,
//!   reservations, cancellation/reschedule)
//! - **infrastructure**: External concerns (slot cache, in-memory storage,
//!   SeaORM persistence)
//! - **shared**: Error taxonomy and shutdown coordination
//!
//! All time-sensitive operations take `now` explicitly, so behavior is
//! deterministic under test. The provider operates in a single canonical
//! timezone (UTC).

pub mod application;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod shared;

pub use config::EngineConfig;
pub use engine::BookingEngine;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemorySlotCache, InMemoryStorage};
