pub mod currency;
pub mod error;
pub mod foreigner;
pub mod policy;
pub mod share;
pub mod split;
pub mod taxes;
pub mod transfer;
pub mod types;

pub use error::TransferTaxError;
pub use types::*;

/// Standard result type for all transfer-tax operations
pub type TransferTaxResult<T> = Result<T, TransferTaxError>;
