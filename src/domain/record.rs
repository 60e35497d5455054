use super::component::PriceComponent;
use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the channel-agnostic price record for a product in a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseKey {
    pub store: String,
    pub sku: String,
}

impl BaseKey {
    pub fn new(store: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            sku: sku.into(),
        }
    }
}

/// Identifies the per-sales-channel override record layered on top of the
/// base record for the same `(store, sku)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    pub channel: String,
    pub store: String,
    pub sku: String,
}

impl ChannelKey {
    pub fn new(
        channel: impl Into<String>,
        store: impl Into<String>,
        sku: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            store: store.into(),
            sku: sku.into(),
        }
    }
}

/// The base-scope record: up to three independently set price components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasePrices {
    pub original: Option<PriceComponent>,
    pub sale: Option<PriceComponent>,
    pub promotion: Option<PriceComponent>,
}

/// A partial base-scope update. `None` fields leave the stored component
/// untouched; `Some` fields overwrite both value and expiry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasePatch {
    pub original: Option<Money>,
    pub sale: Option<Money>,
    pub promotion: Option<Money>,
}

impl BasePrices {
    /// Merges a patch into the record, stamping every provided field with
    /// `expires_at`.
    pub fn apply(&mut self, patch: &BasePatch, expires_at: DateTime<Utc>) {
        if let Some(price) = patch.original {
            self.original = Some(PriceComponent::new(price, expires_at));
        }
        if let Some(price) = patch.sale {
            self.sale = Some(PriceComponent::new(price, expires_at));
        }
        if let Some(price) = patch.promotion {
            self.promotion = Some(PriceComponent::new(price, expires_at));
        }
    }

    /// The record as visible at `now`: expired components read as absent.
    pub fn active(&self, now: DateTime<Utc>) -> BasePrices {
        let keep = |c: &Option<PriceComponent>| c.filter(|c| c.is_active(now));
        BasePrices {
            original: keep(&self.original),
            sale: keep(&self.sale),
            promotion: keep(&self.promotion),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_none() && self.sale.is_none() && self.promotion.is_none()
    }
}

/// The channel-scope record: zero or one override component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelPrices {
    pub original: Option<PriceComponent>,
}

impl ChannelPrices {
    pub fn apply(&mut self, price: Money, expires_at: DateTime<Utc>) {
        self.original = Some(PriceComponent::new(price, expires_at));
    }

    pub fn active(&self, now: DateTime<Utc>) -> Option<PriceComponent> {
        self.original.filter(|c| c.is_active(now))
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

    #[test]
    fn test_apply_sets_only_provided_fields() {
        let mut record = BasePrices::default();
        let expires = Utc::now() + Duration::days(1);

        record.apply(
            &BasePatch {
                original: Some(money("588.5", "550.0")),
                ..Default::default()
            },
            expires,
        );

        assert!(record.original.is_some());
        assert!(record.sale.is_none());
        assert!(record.promotion.is_none());
    }

    #[test]
    fn test_apply_preserves_untouched_fields() {
        let mut record = BasePrices::default();
        let expires = Utc::now() + Duration::days(1);

        record.apply(
            &BasePatch {
                original: Some(money("588.5", "550.0")),
                ..Default::default()
            },
            expires,
        );
        record.apply(
            &BasePatch {
                promotion: Some(money("214.0", "200.0")),
                ..Default::default()
            },
            expires,
        );

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

    #[test]
    fn test_apply_overwrites_value_and_expiry() {
        let mut record = BasePrices::default();
        let first_expiry = Utc::now() + Duration::hours(1);
        let second_expiry = Utc::now() + Duration::days(7);

        record.apply(
            &BasePatch {
                sale: Some(money("428.0", "400.0")),
                ..Default::default()
            },
            first_expiry,
        );
        record.apply(
            &BasePatch {
                sale: Some(money("321.0", "300.0")),
                ..Default::default()
            },
            second_expiry,
        );

        let sale = record.sale.unwrap();
        assert_eq!(sale.price, Money::new(dec!(321.0), dec!(300.0)));
        assert_eq!(sale.expires_at, second_expiry);
    }

    #[test]
    fn test_active_filters_expired_components() {
        let now = Utc::now();
        let mut record = BasePrices::default();
        record.apply(
            &BasePatch {
                original: Some(money("588.5", "550.0")),
                ..Default::default()
            },
            now - Duration::seconds(1),
        );
        record.apply(
            &BasePatch {
                promotion: Some(money("214.0", "200.0")),
                ..Default::default()
            },
            now + Duration::hours(1),
        );

        let visible = record.active(now);
        assert!(visible.original.is_none());
        assert!(visible.promotion.is_some());
    }

    #[test]
    fn test_channel_apply_and_expiry() {
        let now = Utc::now();
        let mut record = ChannelPrices::default();
        record.apply(money("856.0", "800.0"), now + Duration::hours(1));
        assert!(record.active(now).is_some());

        record.apply(money("856.0", "800.0"), now - Duration::hours(1));
        assert!(record.active(now).is_none());
    }
}
