//! Agent errors

use hirewire_llm::LLMError;
use hirewire_marketplace::MarketplaceError;
use hirewire_types::HireWireError;
use thiserror::Error;

/// Why one dispatch tier could not obtain a specialist's output
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error("No in-process handler for {skill}")]
    NoHandler { skill: String },

    #[error("Generation failed: {0}")]
    Generation(#[from] LLMError),

    #[error("Specialist endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed specialist reply: {message}")]
    MalformedReply { message: String },

    #[error("Specialist reported failure: {message}")]
    SpecialistFailed { message: String },
}

/// Errors that abort a whole job
#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),

    #[error(transparent)]
    Amount(#[from] HireWireError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
