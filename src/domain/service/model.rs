//! Service catalog entry

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A bookable service offered by a provider.
///
/// The engine only consumes `duration_minutes`; price and the rest of the
/// catalog belong to the listing subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i64,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        duration_minutes: i64,
        price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            duration_minutes,
            price,
            is_active: true,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_service_is_active() {
        let s = Service::new(
            Uuid::new_v4(),
            "Swedish massage",
            60,
            Decimal::from(1000),
            Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap(),
        );
        assert!(s.is_active);
        assert_eq!(s.duration_minutes, 60);
    }
}
