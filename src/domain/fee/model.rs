//! Cancellation fee computation
//!
//! Time-tiered fee and refund arithmetic. Pure computation over inputs
//! supplied by the caller; payment execution belongs to the payment
//! collaborator.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::time_window::hours_until;

/// Which side is cancelling the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CancellationInitiator {
    Client,
    Provider,
}

impl CancellationInitiator {
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client)
    }
}

impl std::fmt::Display for CancellationInitiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Provider => write!(f, "provider"),
        }
    }
}

/// Computed cancellation quote; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuote {
    pub fee_percent: u32,
    pub fee_amount: Decimal,
    pub hours_until_start: f64,
    pub is_client_initiated: bool,
    pub description: String,
}

/// Fee percentage for a cancellation `hours_until_start` hours before the
/// appointment. Providers pay more for late cancellations since they let
/// the client down.
///
/// | hours until start | client % | provider % |
/// |-------------------|----------|------------|
/// | < 0               | 100      | 100        |
/// | 0–2               | 50       | 50         |
/// | 2–6               | 30       | 50         |
/// | 6–12              | 20       | 30         |
/// | 12–24             | 10       | 20         |
/// | ≥ 24              | 0        | 0          |
pub fn fee_percent_for(hours_until_start: f64, initiator: CancellationInitiator) -> u32 {
    let client = initiator.is_client();
    if hours_until_start < 0.0 {
        100
    } else if hours_until_start < 2.0 {
        50
    } else if hours_until_start < 6.0 {
        if client {
            30
        } else {
            50
        }
    } else if hours_until_start < 12.0 {
        if client {
            20
        } else {
            30
        }
    } else if hours_until_start < 24.0 {
        if client {
            10
        } else {
            20
        }
    } else {
        0
    }
}

/// Quote the cancellation fee for an appointment starting at
/// `start_instant`, cancelled at `now`.
pub fn cancellation_fee(
    total_price: Decimal,
    start_instant: DateTime<Utc>,
    now: DateTime<Utc>,
    initiator: CancellationInitiator,
) -> FeeQuote {
    let hours = hours_until(start_instant, now);
    let percent = fee_percent_for(hours, initiator);
    let fee_amount = (total_price * Decimal::from(percent) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let description = if hours < 0.0 {
        format!("Cancelled by {} after the appointment started", initiator)
    } else {
        format!(
            "Cancelled by {} {:.1}h before the appointment ({}% fee)",
            initiator, hours, percent
        )
    };

    FeeQuote {
        fee_percent: percent,
        fee_amount,
        hours_until_start: hours,
        is_client_initiated: initiator.is_client(),
        description,
    }
}

/// Refund owed after deducting the fee from what was actually paid.
/// Never negative.
pub fn refund(paid_amount: Decimal, fee_amount: Decimal) -> Decimal {
    (paid_amount - fee_amount).max(Decimal::ZERO)
}

// ── Tests ──────────────────────────────────────────────────────
