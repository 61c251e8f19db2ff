//! Service catalog aggregate

pub mod model;
pub mod repository;

pub use model::Service;
pub use repository::ServiceRepository;
