use super::service::PriceUpdate;
use crate::error::Result;

/// Rejects updates that carry no price for their scope.
///
/// The check is independent of stored state: an update that would change
/// nothing is rejected even against a fully populated record. A base update
/// must carry at least one of original/sale/promotion; a channel update must
/// carry the channel price.
pub fn validate(update: &PriceUpdate) -> Result<()> {
    let has_price = match update.channel {
        Some(_) => update.original.is_some(),
        None => {
            update.original.is_some() || update.sale.is_some() || update.promotion.is_some()
        }
    };

    if has_price {
        Ok(())
    } else {
        Err(update.invalid_payload())
    }
}
