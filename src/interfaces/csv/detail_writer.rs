use crate::application::service::PriceDetail;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct DetailRow<'a> {
    channel: &'a str,
    store: &'a str,
    sku: &'a str,
    normal_vat: Decimal,
    normal_non_vat: Decimal,
    special_vat: Option<Decimal>,
    special_non_vat: Option<Decimal>,
}

/// Writes resolved price details as CSV rows.
///
/// Headers are emitted before the first row; lookups that resolve nothing
/// produce no row.
pub struct DetailWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DetailWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_detail(
        &mut self,
        channel: Option<&str>,
        store: &str,
        sku: &str,
        detail: &PriceDetail,
    ) -> Result<()> {
        self.writer.serialize(DetailRow {
            channel: channel.unwrap_or_default(),
            store,
            sku,
            normal_vat: detail.normal.vat,
            normal_non_vat: detail.normal.non_vat,
            special_vat: detail.special.map(|m| m.vat),
            special_non_vat: detail.special.map(|m| m.non_vat),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
