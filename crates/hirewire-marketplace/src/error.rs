//! Marketplace errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketplaceError>;

#[derive(Debug, Clone, Error)]
pub enum MarketplaceError {
    #[error("Specialist directory unavailable: {message}")]
    DirectoryUnavailable { message: String },
}
