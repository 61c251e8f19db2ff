//! In-memory slot availability cache
//!
//! TTL-bounded cache of generated day slot lists, with a secondary index
//! from `(provider, date)` to the exact keys written so day invalidation
//! is O(1) and never scans key patterns.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::slot::{Slot, SlotCache, SlotCacheKey};

struct CacheEntry {
    slots: Vec<Slot>,
    expires_at: DateTime<Utc>,
}

/// Thread-safe in-process implementation of the [`SlotCache`] port
pub struct InMemorySlotCache {
    ttl: Duration,
    entries: DashMap<SlotCacheKey, CacheEntry>,
    day_index: DashMap<(Uuid, NaiveDate), HashSet<SlotCacheKey>>,
}

impl InMemorySlotCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            entries: DashMap::new(),
            day_index: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&self, key: &SlotCacheKey) {
        self.entries.remove(key);
        let day = (key.provider_id, key.date);
        let emptied = match self.day_index.get_mut(&day) {
            Some(mut keys) => {
                keys.remove(key);
                keys.is_empty()
            }
            None => false,
        };
        if emptied {
            self.day_index.remove_if(&day, |_, keys| keys.is_empty());
        }
    }
}

#[async_trait]
impl SlotCache for InMemorySlotCache {
    async fn get(&self, key: &SlotCacheKey, now: DateTime<Utc>) -> Option<Vec<Slot>> {
        {
            let entry = self.entries.get(key)?;
            if now <= entry.expires_at {
                return Some(entry.slots.clone());
            }
        }
        // lazy TTL eviction
        self.remove_entry(key);
        None
    }

    async fn put(&self, key: SlotCacheKey, slots: Vec<Slot>, now: DateTime<Utc>) {
        self.day_index
            .entry((key.provider_id, key.date))
            .or_insert_with(HashSet::new)
            .insert(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                slots,
                expires_at: now + self.ttl,
            },
        );
    }

    async fn invalidate_day(&self, provider_id: Uuid, date: NaiveDate) {
        if let Some((_, keys)) = self.day_index.remove(&(provider_id, date)) {
            let count = keys.len();
            for key in keys {
                self.entries.remove(&key);
            }
            debug!(%provider_id, %date, count, "Invalidated cached slot entries");
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    fn key(provider_id: Uuid, day: u32, duration: i64) -> SlotCacheKey {
        SlotCacheKey {
            provider_id,
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            duration_minutes: duration,
        }
    }

    fn sample_slots() -> Vec<Slot> {
        vec![Slot {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: 60,
            available: true,
        }]
    }

    #[tokio::test]
    async fn get_within_ttl_and_miss_after() {
        let cache = InMemorySlotCache::new(300);
        let provider_id = Uuid::new_v4();
        let key = key(provider_id, 2, 60);

        cache.put(key.clone(), sample_slots(), now()).await;
        assert_eq!(cache.get(&key, now()).await, Some(sample_slots()));
        assert_eq!(
            cache.get(&key, now() + Duration::seconds(300)).await,
            Some(sample_slots())
        );
        assert!(cache
            .get(&key, now() + Duration::seconds(301))
            .await
            .is_none());
        // the expired entry was evicted
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalidate_day_drops_every_duration_variant() {
        let cache = InMemorySlotCache::new(300);
        let provider_id = Uuid::new_v4();
        let short = key(provider_id, 2, 30);
        let long = key(provider_id, 2, 90);
        let other_day = key(provider_id, 3, 30);
        let other_provider = key(Uuid::new_v4(), 2, 30);

        for k in [&short, &long, &other_day, &other_provider] {
            cache.put(k.clone(), sample_slots(), now()).await;
        }
        assert_eq!(cache.len(), 4);

        cache
            .invalidate_day(provider_id, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .await;

        assert!(cache.get(&short, now()).await.is_none());
        assert!(cache.get(&long, now()).await.is_none());
        assert!(cache.get(&other_day, now()).await.is_some());
        assert!(cache.get(&other_provider, now()).await.is_some());
    }

    #[tokio::test]
    async fn invalidating_an_uncached_day_is_a_no_op() {
        let cache = InMemorySlotCache::new(300);
        cache
            .invalidate_day(Uuid::new_v4(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn put_overwrites_a_stale_entry() {
        let cache = InMemorySlotCache::new(300);
        let provider_id = Uuid::new_v4();
        let key = key(provider_id, 2, 60);

        cache.put(key.clone(), Vec::new(), now()).await;
        cache.put(key.clone(), sample_slots(), now()).await;
        assert_eq!(cache.get(&key, now()).await, Some(sample_slots()));
        assert_eq!(cache.len(), 1);
    }
}
