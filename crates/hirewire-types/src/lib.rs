//! HireWire Types - Canonical domain types for the specialist marketplace
//!
//! This crate contains the foundational types shared by every other hirewire
//! crate, with zero dependencies on them:
//!
//! - Skill tags and specialist records (the directory's vocabulary)
//! - Fixed-point token amounts used for rates and invoices
//! - The public job response consumed by the chat UI
//! - The specialist endpoint request/reply contract
//!
//! # Wire Conventions
//!
//! Every numeric-looking field that leaves the process (rates, invoice
//! amounts, breakdown shares) is transmitted as a string so downstream
//! payment logic never sees a floating-point value.

pub mod amount;
pub mod error;
pub mod job;
pub mod skill;
pub mod specialist;

pub use amount::*;
pub use error::*;
pub use job::*;
pub use skill::*;
pub use specialist::*;

/// Address used when no specialist address can be resolved for an invoice.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Currency symbol used when nothing else specifies one.
pub const DEFAULT_CURRENCY: &str = "ETH";
