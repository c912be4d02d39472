pub mod correction;
pub mod error;
pub mod indices;
pub mod settlement;
pub mod tax;
pub mod types;

pub use error::PrecatorioError;
pub use types::*;

/// Standard result type for all precatório operations
pub type PrecatorioResult<T> = Result<T, PrecatorioError>;
