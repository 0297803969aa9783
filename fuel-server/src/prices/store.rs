//! Price table storage.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{FuelType, PriceRecord, StationId};

/// Key-value store of crowd-sourced prices, keyed by station id.
///
/// Handlers receive the store by reference through the application state,
/// so the in-memory table can be replaced by a persistent one without
/// touching the merge logic.
pub trait PriceStore: Send + Sync {
    /// Look up records for many stations at once. Ids without a record are absent.
    fn get_many<'a>(
        &'a self,
        ids: &'a [StationId],
    ) -> BoxFuture<'a, HashMap<StationId, PriceRecord>>;

    /// Set the price for one fuel and stamp `at` as the update time.
    ///
    /// Creates the record if it does not exist. Returns the stored record.
    fn upsert(
        &self,
        id: StationId,
        fuel: FuelType,
        price: f64,
        at: DateTime<Utc>,
    ) -> BoxFuture<'_, PriceRecord>;

    /// Number of stations with a record.
    fn len(&self) -> BoxFuture<'_, usize>;
}

/// Process-local price table.
///
/// Unbounded and never evicted; contents are lost on restart. Concurrent
/// updates to the same station resolve as last write wins.
#[derive(Clone, Default)]
pub struct InMemoryPriceStore {
    inner: Arc<RwLock<HashMap<StationId, PriceRecord>>>,
}

impl InMemoryPriceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    #[cfg(test)]
    pub(crate) fn with_records(
        records: impl IntoIterator<Item = (StationId, PriceRecord)>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(records.into_iter().collect())),
        }
    }
}

impl PriceStore for InMemoryPriceStore {
    fn get_many<'a>(
        &'a self,
        ids: &'a [StationId],
    ) -> BoxFuture<'a, HashMap<StationId, PriceRecord>> {
        async move {
            let guard = self.inner.read().await;
            ids.iter()
                .filter_map(|id| guard.get(id).map(|r| (*id, r.clone())))
                .collect()
        }
        .boxed()
    }

    fn upsert(
        &self,
        id: StationId,
        fuel: FuelType,
        price: f64,
        at: DateTime<Utc>,
    ) -> BoxFuture<'_, PriceRecord> {
        async move {
            let mut guard = self.inner.write().await;
            let record = guard.entry(id).or_default();
            record.apply(fuel, price, at);
            record.clone()
        }
        .boxed()
    }

    fn len(&self) -> BoxFuture<'_, usize> {
        async move {
            let guard = self.inner.read().await;
            guard.len()
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, min, 0).unwrap()
    }

    async fn stored(store: &InMemoryPriceStore, id: StationId) -> Option<PriceRecord> {
        store.get_many(&[id]).await.remove(&id)
    }

    #[tokio::test]
    async fn empty_store() {
        let store = InMemoryPriceStore::new();
        assert_eq!(store.len().await, 0);
        assert_eq!(stored(&store, StationId::new(1)).await, None);
    }

    #[tokio::test]
    async fn upsert_creates_record() {
        let store = InMemoryPriceStore::new();
        let id = StationId::new(5);

        let record = store.upsert(id, FuelType::Diesel, 14.2, at(0)).await;
        assert_eq!(record.diesel_price, Some(14.2));
        assert_eq!(record.petrol_price, None);
        assert_eq!(record.last_updated, Some(at(0)));

        assert_eq!(stored(&store, id).await, Some(record));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn upsert_merges_fuels_into_one_record() {
        let store = InMemoryPriceStore::new();
        let id = StationId::new(5);

        store.upsert(id, FuelType::Petrol, 12.5, at(0)).await;
        store.upsert(id, FuelType::Diesel, 14.2, at(1)).await;

        let record = stored(&store, id).await.unwrap();
        assert_eq!(record.petrol_price, Some(12.5));
        assert_eq!(record.diesel_price, Some(14.2));
        assert_eq!(record.last_updated, Some(at(1)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = InMemoryPriceStore::new();
        let id = StationId::new(7);

        store.upsert(id, FuelType::Petrol, 12.5, at(0)).await;
        store.upsert(id, FuelType::Petrol, 11.9, at(2)).await;

        let record = stored(&store, id).await.unwrap();
        assert_eq!(record.petrol_price, Some(11.9));
    }

    #[tokio::test]
    async fn repeated_identical_update_is_idempotent() {
        let store = InMemoryPriceStore::new();
        let id = StationId::new(7);

        let first = store.upsert(id, FuelType::Petrol, 12.5, at(0)).await;
        let second = store.upsert(id, FuelType::Petrol, 12.5, at(3)).await;

        assert_eq!(first.petrol_price, second.petrol_price);
        assert_eq!(first.diesel_price, second.diesel_price);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn negative_price_stored_as_is() {
        let store = InMemoryPriceStore::new();
        let record = store.upsert(StationId::new(1), FuelType::Petrol, -1.0, at(0)).await;
        assert_eq!(record.petrol_price, Some(-1.0));
    }

    #[tokio::test]
    async fn get_many_skips_unknown_ids() {
        let mut rec = PriceRecord::default();
        rec.apply(FuelType::Petrol, 12.5, at(0));
        let store = InMemoryPriceStore::with_records([(StationId::new(5), rec.clone())]);

        let ids = [StationId::new(5), StationId::new(6)];
        let found = store.get_many(&ids).await;

        assert_eq!(found.len(), 1);
        assert_eq!(found.get(&StationId::new(5)), Some(&rec));
    }

    #[tokio::test]
    async fn clones_share_the_table() {
        let store = InMemoryPriceStore::new();
        let other = store.clone();

        store.upsert(StationId::new(3), FuelType::Diesel, 15.0, at(0)).await;

        assert_eq!(other.len().await, 1);
    }
}
