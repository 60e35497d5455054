use thiserror::Error;

pub type Result<T> = std::result::Result<T, PriceError>;

#[derive(Error, Debug)]
pub enum PriceError {
    /// An update request that carries no price for its scope. The message
    /// format is part of the service contract; `channel` is empty for
    /// base-scope updates, which yields the leading `:` separator.
    #[error("Invalid payload detected, {channel}:{store}:{sku} has no prices.")]
    InvalidPayload {
        channel: String,
        store: String,
        sku: String,
    },
    #[error("Malformed command: {0}")]
    MalformedCommand(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}
