use crate::domain::component::PriceComponent;
use crate::domain::money::Money;
use crate::domain::ports::{BasePriceStore, ChannelPriceStore};
use crate::domain::record::{BaseKey, BasePatch, BasePrices, ChannelKey, ChannelPrices};
use crate::error::{PriceError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column family for base-scope price records.
pub const CF_BASE_PRICES: &str = "base_prices";
/// Column family for channel-scope override records.
pub const CF_CHANNEL_PRICES: &str = "channel_prices";

/// A persistent store implementation using RocksDB.
///
/// Base and channel records live in separate column families with
/// JSON-encoded keys and values. Upserts are read-modify-write cycles
/// serialized by `merge_lock`, so concurrent partial updates cannot lose
/// fields. `Clone` shares the underlying `Arc<DB>` and the lock.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
    merge_lock: Arc<Mutex<()>>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_base = ColumnFamilyDescriptor::new(CF_BASE_PRICES, Options::default());
        let cf_channel = ColumnFamilyDescriptor::new(CF_CHANNEL_PRICES, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_base, cf_channel])?;

        Ok(Self {
            db: Arc::new(db),
            merge_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf_handle(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PriceError::Io(std::io::Error::other(format!(
                "column family {name} not found"
            )))
        })
    }

    fn read_record<K: Serialize, V: DeserializeOwned + Default>(
        &self,
        cf_name: &str,
        key: &K,
    ) -> Result<V> {
        let cf = self.cf_handle(cf_name)?;
        let key = serde_json::to_vec(key)?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(V::default()),
        }
    }

    fn write_record<K: Serialize, V: Serialize>(
        &self,
        cf_name: &str,
        key: &K,
        value: &V,
    ) -> Result<()> {
        let cf = self.cf_handle(cf_name)?;
        let key = serde_json::to_vec(key)?;
        let value = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key, value)?;
        Ok(())
    }
}

#[async_trait]
impl BasePriceStore for RocksDbStore {
    async fn upsert(
        &self,
        key: &BaseKey,
        patch: &BasePatch,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let _guard = self.merge_lock.lock().await;
        let mut record: BasePrices = self.read_record(CF_BASE_PRICES, key)?;
        record.apply(patch, expires_at);
        self.write_record(CF_BASE_PRICES, key, &record)
    }

    async fn get(&self, key: &BaseKey, now: DateTime<Utc>) -> Result<BasePrices> {
        let record: BasePrices = self.read_record(CF_BASE_PRICES, key)?;
        Ok(record.active(now))
    }
}

#[async_trait]
impl ChannelPriceStore for RocksDbStore {
    async fn upsert(
        &self,
        key: &ChannelKey,
        price: Money,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let _guard = self.merge_lock.lock().await;
        let mut record: ChannelPrices = self.read_record(CF_CHANNEL_PRICES, key)?;
        record.apply(price, expires_at);
        self.write_record(CF_CHANNEL_PRICES, key, &record)
    }

    async fn get(
        &self,
        key: &ChannelKey,
        now: DateTime<Utc>,
    ) -> Result<Option<PriceComponent>> {
        let record: ChannelPrices = self.read_record(CF_CHANNEL_PRICES, key)?;
        Ok(record.active(now))
    }
}
