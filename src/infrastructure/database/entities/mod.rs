//! SeaORM entities

pub mod booking;
pub mod provider_schedule;
pub mod reservation;
pub mod service;
