//! API Handlers

pub mod health;
pub mod jobs;
pub mod specialist;

pub use health::*;
