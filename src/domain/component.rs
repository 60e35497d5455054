use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored price with its expiry instant.
///
/// Expiry is the only disappearance mechanism for stored prices: a component
/// past its `expires_at` behaves exactly as if it had never been set, until
/// the next update overwrites both value and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub price: Money,
    pub expires_at: DateTime<Utc>,
}

impl PriceComponent {
    pub fn new(price: Money, expires_at: DateTime<Utc>) -> Self {
        Self { price, expires_at }
    }

    /// A component is active strictly before its expiry instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn component(expires_at: DateTime<Utc>) -> PriceComponent {
        PriceComponent::new(Money::new(dec!(10.0), dec!(8.0)), expires_at)
    }

    #[test]
    fn test_active_before_expiry() {
        let now = Utc::now();
        assert!(component(now + Duration::hours(1)).is_active(now));
    }

    #[test]
    fn test_inactive_at_expiry_instant() {
        let now = Utc::now();
        assert!(!component(now).is_active(now));
    }

    #[test]
    fn test_inactive_after_expiry() {
        let now = Utc::now();
        assert!(!component(now - Duration::seconds(1)).is_active(now));
    }
}
