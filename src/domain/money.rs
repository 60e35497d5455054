use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A displayed monetary value: the VAT-inclusive amount and the net amount.
///
/// Both halves are `rust_decimal::Decimal` to keep exact decimal arithmetic
/// for money; the pair always travels together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub vat: Decimal,
    pub non_vat: Decimal,
}

impl Money {
    pub fn new(vat: Decimal, non_vat: Decimal) -> Self {
        Self { vat, non_vat }
    }
}
