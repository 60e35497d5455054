use super::validator;
use crate::domain::money::Money;
use crate::domain::ports::{BasePriceStoreBox, ChannelPriceStoreBox};
use crate::domain::record::{BaseKey, BasePatch, ChannelKey};
use crate::domain::resolver::{self, ResolvedPrice};
use crate::error::{PriceError, Result};
use chrono::{DateTime, Utc};

/// An update request against either scope.
///
/// `channel: None` targets the base record and may carry any subset of the
/// three base components. `channel: Some(_)` targets the channel record;
/// `original` carries the override value and the other fields are not read
/// for that scope.
#[derive(Debug, Clone)]
pub struct PriceUpdate {
    pub channel: Option<String>,
    pub store: String,
    pub sku: String,
    pub original: Option<Money>,
    pub sale: Option<Money>,
    pub promotion: Option<Money>,
    pub expires_at: DateTime<Utc>,
}

impl PriceUpdate {
    /// The error for an update carrying no usable price. The message embeds
    /// the scoped key; base-scope updates render an empty channel segment.
    pub(crate) fn invalid_payload(&self) -> PriceError {
        PriceError::InvalidPayload {
            channel: self.channel.clone().unwrap_or_default(),
            store: self.store.clone(),
            sku: self.sku.clone(),
        }
    }
}

/// The single detail returned by a resolvable lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDetail {
    pub normal: Money,
    pub special: Option<Money>,
}

impl From<ResolvedPrice> for PriceDetail {
    fn from(resolved: ResolvedPrice) -> Self {
        Self {
            normal: resolved.normal,
            special: resolved.special,
        }
    }
}

/// The engine façade: validate → store on write, fetch both scopes → resolve
/// on read.
///
/// Requests are independent of each other; there is no cross-scope
/// transaction. A lookup racing concurrent writes to the two scopes of one
/// key may observe one write without the other (each scope read is its own
/// snapshot).
pub struct PriceService {
    base: BasePriceStoreBox,
    channel: ChannelPriceStoreBox,
}

impl PriceService {
    pub fn new(base: BasePriceStoreBox, channel: ChannelPriceStoreBox) -> Self {
        Self { base, channel }
    }

    /// Validates and merges an update into the store for its scope.
    ///
    /// Validation failures reject the whole request before any mutation.
    pub async fn update(&self, update: PriceUpdate) -> Result<()> {
        validator::validate(&update)?;

        match &update.channel {
            Some(channel) => {
                let Some(price) = update.original else {
                    return Err(update.invalid_payload());
                };
                let key = ChannelKey::new(channel.clone(), &update.store, &update.sku);
                tracing::debug!(
                    channel = %channel,
                    store = %update.store,
                    sku = %update.sku,
                    "channel price update"
                );
                self.channel.upsert(&key, price, update.expires_at).await
            }
            None => {
                let key = BaseKey::new(&update.store, &update.sku);
                let patch = BasePatch {
                    original: update.original,
                    sale: update.sale,
                    promotion: update.promotion,
                };
                tracing::debug!(store = %update.store, sku = %update.sku, "base price update");
                self.base.upsert(&key, &patch, update.expires_at).await
            }
        }
    }

    /// Looks up the displayed prices for a key, through an optional channel.
    ///
    /// Returns `None` when neither scope holds an active component the
    /// resolver can use.
    pub async fn get(
        &self,
        channel: Option<&str>,
        store: &str,
        sku: &str,
    ) -> Result<Option<PriceDetail>> {
        let now = Utc::now();

        let base = self.base.get(&BaseKey::new(store, sku), now).await?;
        let channel_component = match channel {
            Some(channel) => {
                self.channel
                    .get(&ChannelKey::new(channel, store, sku), now)
                    .await?
            }
            None => None,
        };

        Ok(resolver::resolve(&base, channel_component.as_ref()).map(PriceDetail::from))
    }
}
