use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "op,channel,store,sku,original_vat,original_non_vat,sale_vat,sale_non_vat,promotion_vat,promotion_non_vat,expires_at";

/// Writes a price-command CSV with the standard header and the given rows.
pub fn commands_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}
