use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrecatorioError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Heir quotas sum to {actual}%, expected {expected}% (tolerance 0.01)")]
    HeirQuotaMismatch { expected: Decimal, actual: Decimal },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PrecatorioError {
    fn from(e: serde_json::Error) -> Self {
        PrecatorioError::SerializationError(e.to_string())
    }
}
