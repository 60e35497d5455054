use crate::application::service::PriceUpdate;
use crate::domain::money::Money;
use crate::error::{PriceError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandOp {
    Update,
    Get,
}

/// One CSV row: an update or a lookup against a scoped key.
///
/// Money pairs come as two decimal columns each; a pair must be both-present
/// or both-absent. `expires_at` is RFC 3339 and required for updates.
#[derive(Debug, Deserialize, Clone)]
pub struct PriceCommand {
    pub op: CommandOp,
    pub channel: Option<String>,
    pub store: String,
    pub sku: String,
    pub original_vat: Option<Decimal>,
    pub original_non_vat: Option<Decimal>,
    pub sale_vat: Option<Decimal>,
    pub sale_non_vat: Option<Decimal>,
    pub promotion_vat: Option<Decimal>,
    pub promotion_non_vat: Option<Decimal>,
    pub expires_at: Option<DateTime<Utc>>,
}

fn pair(vat: Option<Decimal>, non_vat: Option<Decimal>, name: &str) -> Result<Option<Money>> {
    match (vat, non_vat) {
        (Some(vat), Some(non_vat)) => Ok(Some(Money::new(vat, non_vat))),
        (None, None) => Ok(None),
        _ => Err(PriceError::MalformedCommand(format!(
            "{name} price needs both vat and non-vat amounts"
        ))),
    }
}

impl PriceCommand {
    /// Maps an `update` row onto a service request.
    pub fn into_update(self) -> Result<PriceUpdate> {
        let original = pair(self.original_vat, self.original_non_vat, "original")?;
        let sale = pair(self.sale_vat, self.sale_non_vat, "sale")?;
        let promotion = pair(self.promotion_vat, self.promotion_non_vat, "promotion")?;

        if self.channel.is_some() && (sale.is_some() || promotion.is_some()) {
            return Err(PriceError::MalformedCommand(
                "channel updates carry only the original price".to_string(),
            ));
        }

        let Some(expires_at) = self.expires_at else {
            return Err(PriceError::MalformedCommand(
                "update rows need expires_at".to_string(),
            ));
        };

        Ok(PriceUpdate {
            channel: self.channel,
            store: self.store,
            sku: self.sku,
            original,
            sale,
            promotion,
            expires_at,
        })
    }
}

/// Reads price commands from a CSV source.
///
/// Wraps `csv::Reader` and yields an iterator over `Result<PriceCommand>`,
/// trimming whitespace and tolerating short rows so streams can be processed
/// lazily without loading the whole file.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands.
    pub fn commands(self) -> impl Iterator<Item = Result<PriceCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PriceError::from))
    }
}
