//! Reservation management service
//!
//! Places short-lived holds on slots, releases them, and reclaims expired
//! ones. Every effective write invalidates the slot cache for the touched
//! provider/date so the next availability read reflects it.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::reservation::{ReservationStatus, ReservationStore, SlotReservation};
use crate::domain::slot::SlotCache;
use crate::domain::time_window::TimeWindow;
use crate::domain::DomainResult;
use crate::shared::shutdown::ShutdownSignal;

/// Service managing slot holds
pub struct ReservationManager {
    reservations: Arc<dyn ReservationStore>,
    cache: Arc<dyn SlotCache>,
    config: EngineConfig,
}

impl ReservationManager {
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        cache: Arc<dyn SlotCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            reservations,
            cache,
            config,
        }
    }

    /// Hold `window` for `customer_id` for the configured TTL.
    ///
    /// Availability is re-verified inside the store's atomic
    /// insert-if-available, which closes the race between a stale cached
    /// slot view and the write. Fails with `SlotUnavailable` when the
    /// window was claimed in the meantime.
    pub async fn reserve_slot(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        customer_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<SlotReservation> {
        let reservation = SlotReservation::new(
            Uuid::new_v4(),
            provider_id,
            customer_id,
            window,
            now + self.config.hold_duration(),
            now,
        );

        let stored = self
            .reservations
            .insert_if_available(reservation, now)
            .await?;

        self.cache.invalidate_day(provider_id, stored.date).await;
        info!(
            "Reservation {} holds {} {} for customer {} until {}",
            stored.id, stored.date, stored.start_time, customer_id, stored.reserved_until
        );
        Ok(stored)
    }

    /// Release a hold.
    ///
    /// Returns `false` for unknown ids and for holds already released or
    /// expired; only an actual `Reserved → Released` transition touches
    /// the cache.
    pub async fn release_slot(&self, reservation_id: Uuid) -> DomainResult<bool> {
        let Some(reservation) = self.reservations.find_by_id(reservation_id).await? else {
            debug!("Release of unknown reservation {}", reservation_id);
            return Ok(false);
        };
        if reservation.status != ReservationStatus::Reserved {
            return Ok(false);
        }

        let changed = self
            .reservations
            .update_status(reservation_id, ReservationStatus::Released)
            .await?;
        if changed {
            self.cache
                .invalidate_day(reservation.provider_id, reservation.date)
                .await;
            info!("Reservation {} released", reservation_id);
        }
        Ok(changed)
    }

    /// Reclaim holds whose TTL elapsed, for cache hygiene.
    ///
    /// Expiry is already detected lazily on every read; this sweep only
    /// rewrites the rows so listings and stats stop scanning them.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let expired = self.reservations.find_expired(now).await?;
        let mut reclaimed = 0;
        for reservation in expired {
            if self
                .reservations
                .update_status(reservation.id, ReservationStatus::Expired)
                .await?
            {
                self.cache
                    .invalidate_day(reservation.provider_id, reservation.date)
                    .await;
                reclaimed += 1;
            }
        }
        if reclaimed > 0 {
            debug!("Swept {} expired reservations", reclaimed);
        }
        Ok(reclaimed)
    }
}

/// Background task periodically reclaiming expired holds.
///
/// Optional; the engine is correct without it since expiry is checked
/// lazily at read time.
pub struct ReservationSweeper {
    manager: Arc<ReservationManager>,
    interval_secs: u64,
}

impl ReservationSweeper {
    pub fn new(manager: Arc<ReservationManager>, interval_secs: u64) -> Self {
        Self {
            manager,
            interval_secs,
        }
    }

    /// Start the sweep loop; stops when `shutdown` triggers.
    pub fn start(&self, shutdown: ShutdownSignal) {
        let manager = self.manager.clone();
        let interval_secs = self.interval_secs;

        tokio::spawn(async move {
            info!("Reservation sweeper started (interval: {}s)", interval_secs);
            let mut interval = tokio::time::interval(StdDuration::from_secs(interval_secs));
            let mut stop = shutdown.subscribe();

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = manager.sweep_expired(Utc::now()).await {
                            warn!("Reservation sweep error: {}", e);
                        }
                    }
                    _ = stop.recv() => {
                        info!("Reservation sweeper shutting down");
                        break;
                    }
                }
            }
        });
    }
}

// ── Tests ──────────────────────────────────────────────────────
