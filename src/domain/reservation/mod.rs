//! Reservation aggregate
//!
//! Contains the SlotReservation entity, its status machine, and the store
//! interface with the atomic insert-if-available contract.

pub mod model;
pub mod repository;

pub use model::{ReservationStatus, SlotReservation};
pub use repository::ReservationStore;
