//! Error types for HireWire domain values

use thiserror::Error;

/// Result type for HireWire domain operations
pub type Result<T> = std::result::Result<T, HireWireError>;

/// HireWire domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HireWireError {
    /// A decimal string could not be parsed into a token amount
    #[error("Invalid amount: {input:?}")]
    InvalidAmount { input: String },

    /// Amount arithmetic exceeded the fixed-point range
    #[error("Amount overflow during arithmetic operation")]
    AmountOverflow,

    /// Too many fractional digits for the fixed-point precision
    #[error("Amount {input:?} has more than {max} decimal places")]
    TooManyDecimals { input: String, max: u32 },
}
