use crate::domain::component::PriceComponent;
use crate::domain::money::Money;
use crate::domain::ports::{BasePriceStore, ChannelPriceStore};
use crate::domain::record::{BaseKey, BasePatch, BasePrices, ChannelKey, ChannelPrices};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for base-scope price records.
///
/// Uses `Arc<RwLock<HashMap>>` for shared concurrent access. The write lock
/// serializes merges, so concurrent partial updates to one key cannot
/// interleave and drop fields; reads clone an expiry-filtered snapshot under
/// the read lock.
#[derive(Default, Clone)]
pub struct InMemoryBaseStore {
    records: Arc<RwLock<HashMap<BaseKey, BasePrices>>>,
}

impl InMemoryBaseStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BasePriceStore for InMemoryBaseStore {
    async fn upsert(
        &self,
        key: &BaseKey,
        patch: &BasePatch,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        records
            .entry(key.clone())
            .or_default()
            .apply(patch, expires_at);
        Ok(())
    }

    async fn get(&self, key: &BaseKey, now: DateTime<Utc>) -> Result<BasePrices> {
        let records = self.records.read().await;
        Ok(records
            .get(key)
            .map(|record| record.active(now))
            .unwrap_or_default())
    }
}

/// A thread-safe in-memory store for channel-scope override records.
#[derive(Default, Clone)]
pub struct InMemoryChannelStore {
    records: Arc<RwLock<HashMap<ChannelKey, ChannelPrices>>>,
}

impl InMemoryChannelStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelPriceStore for InMemoryChannelStore {
    async fn upsert(
        &self,
        key: &ChannelKey,
        price: Money,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        records
            .entry(key.clone())
            .or_default()
            .apply(price, expires_at);
        Ok(())
    }

    async fn get(
        &self,
        key: &ChannelKey,
        now: DateTime<Utc>,
    ) -> Result<Option<PriceComponent>> {
        let records = self.records.read().await;
        Ok(records.get(key).and_then(|record| record.active(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn money(vat: &str, non_vat: &str) -> Money {
        Money::new(vat.parse().unwrap(), non_vat.parse().unwrap())
    }

    #[tokio::test]
    async fn test_base_store_merge_and_get() {
        let store = InMemoryBaseStore::new();
        let key = BaseKey::new("store-1", "sku-1");
        let now = Utc::now();
        let expires = now + Duration::days(1);

        store
            .upsert(
                &key,
                &BasePatch {
                    original: Some(money("588.5", "550.0")),
                    ..Default::default()
                },
                expires,
            )
            .await
            .unwrap();
        store
            .upsert(
                &key,
                &BasePatch {
                    promotion: Some(money("214.0", "200.0")),
                    ..Default::default()
                },
                expires,
            )
            .await
            .unwrap();

        let record = store.get(&key, now).await.unwrap();
        assert_eq!(
            record.original.unwrap().price,
            Money::new(dec!(588.5), dec!(550.0))
        );
        assert_eq!(
            record.promotion.unwrap().price,
            Money::new(dec!(214.0), dec!(200.0))
        );
        assert!(record.sale.is_none());
    }

    #[tokio::test]
    async fn test_base_store_missing_key_reads_empty() {
        let store = InMemoryBaseStore::new();
        let record = store
            .get(&BaseKey::new("store-1", "missing"), Utc::now())
            .await
            .unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_base_store_filters_expired_on_read() {
        let store = InMemoryBaseStore::new();
        let key = BaseKey::new("store-1", "sku-1");
        let now = Utc::now();

        store
            .upsert(
                &key,
                &BasePatch {
                    original: Some(money("588.5", "550.0")),
                    ..Default::default()
                },
                now - Duration::seconds(1),
            )
            .await
            .unwrap();

        let record = store.get(&key, now).await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_channel_store_upsert_and_expiry() {
        let store = InMemoryChannelStore::new();
        let key = ChannelKey::new("web", "store-1", "sku-1");
        let now = Utc::now();

        store
            .upsert(&key, money("856.0", "800.0"), now + Duration::hours(1))
            .await
            .unwrap();
        let component = store.get(&key, now).await.unwrap().unwrap();
        assert_eq!(component.price, Money::new(dec!(856.0), dec!(800.0)));

        store
            .upsert(&key, money("856.0", "800.0"), now - Duration::hours(1))
            .await
            .unwrap();
        assert!(store.get(&key, now).await.unwrap().is_none());
    }
}
