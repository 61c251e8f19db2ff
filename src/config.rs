//! Configuration module

use chrono::Duration;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Granularity at which candidate slots are generated, in minutes
    pub slot_interval_minutes: i64,
    /// How long a slot hold lasts before expiring, in minutes
    pub reservation_hold_minutes: i64,
    /// TTL of cached per-day slot lists, in seconds
    pub cache_ttl_secs: u64,
    /// Hour of day past which the nearest-slot scan jumps to the next
    /// day's opening instead of continuing past closing
    pub late_cutoff_hour: u32,
    /// Interval of the optional expired-hold sweep, in seconds
    pub sweep_interval_secs: u64,
}

impl EngineConfig {
    pub fn tick(&self) -> Duration {
        Duration::minutes(self.slot_interval_minutes)
    }

    pub fn hold_duration(&self) -> Duration {
        Duration::minutes(self.reservation_hold_minutes)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_interval_minutes: 30,
            reservation_hold_minutes: 15,
            cache_ttl_secs: 300,
            late_cutoff_hour: 22,
            sweep_interval_secs: 60,
        }
    }
}
