//! Cancellation fee aggregate

pub mod model;

pub use model::{cancellation_fee, fee_percent_for, refund, CancellationInitiator, FeeQuote};
