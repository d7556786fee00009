use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferTaxError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown exchange rate for {currency}")]
    UnknownExchangeRate { currency: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TransferTaxError {
    fn from(e: serde_json::Error) -> Self {
        TransferTaxError::SerializationError(e.to_string())
    }
}
