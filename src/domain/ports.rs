use super::component::PriceComponent;
use super::money::Money;
use super::record::{BaseKey, BasePatch, BasePrices, ChannelKey};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage port for base-scope price records.
///
/// `upsert` merges a partial patch into the record for `key`, creating the
/// record on first write; every field carried by the patch gets `expires_at`.
/// `get` returns the record as visible at `now`, with expired components
/// filtered out. Implementations must serialize merges for a given key so
/// concurrent partial updates never lose fields.
#[async_trait]
pub trait BasePriceStore: Send + Sync {
    async fn upsert(
        &self,
        key: &BaseKey,
        patch: &BasePatch,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn get(&self, key: &BaseKey, now: DateTime<Utc>) -> Result<BasePrices>;
}

/// Storage port for channel-scope override records.
#[async_trait]
pub trait ChannelPriceStore: Send + Sync {
    async fn upsert(
        &self,
        key: &ChannelKey,
        price: Money,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn get(&self, key: &ChannelKey, now: DateTime<Utc>)
    -> Result<Option<PriceComponent>>;
}

pub type BasePriceStoreBox = Box<dyn BasePriceStore>;
pub type ChannelPriceStoreBox = Box<dyn ChannelPriceStore>;
