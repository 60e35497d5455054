use super::component::PriceComponent;
use super::money::Money;
use super::record::BasePrices;

/// The two display slots computed for a price lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    pub normal: Money,
    pub special: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Original,
    Sale,
    Promotion,
}

/// Computes the displayed price slots from the active components of both
/// scopes.
///
/// A present channel component is a total override: it fills the normal slot
/// and suppresses the special slot. Otherwise the normal slot takes the first
/// present component of `[original, sale, promotion]` and the special slot
/// the first present component of `[promotion, sale]` excluding whichever
/// kind won the normal slot. Sale outranks promotion for the normal slot
/// while promotion outranks sale for the special slot; the asymmetry is
/// intentional.
///
/// Inputs are expected to be expiry-filtered already (stores do this at read
/// time); `None` means no resolvable price exists for the key.
pub fn resolve(base: &BasePrices, channel: Option<&PriceComponent>) -> Option<ResolvedPrice> {
    if let Some(component) = channel {
        return Some(ResolvedPrice {
            normal: component.price,
            special: None,
        });
    }

    let (normal_kind, normal) = if let Some(c) = base.original {
        (Kind::Original, c.price)
    } else if let Some(c) = base.sale {
        (Kind::Sale, c.price)
    } else if let Some(c) = base.promotion {
        (Kind::Promotion, c.price)
    } else {
        return None;
    };

    let special = match normal_kind {
        Kind::Original => base.promotion.or(base.sale).map(|c| c.price),
        Kind::Sale => base.promotion.map(|c| c.price),
        Kind::Promotion => base.sale.map(|c| c.price),
    };

    Some(ResolvedPrice { normal, special })
}
