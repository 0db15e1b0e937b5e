//! HireWire Agents - The coordinating agent and its specialists
//!
//! A job flows through the coordinator as a small state machine:
//!
//! ```text
//! received -> informational answer
//!          -> clarification (vague input)
//!          -> classify skills -> hire cheapest -> dispatch -> aggregate
//!          -> completed | failed
//! ```
//!
//! - **IntentClassifier**: rule tables mapping free text to skill tags
//! - **SpecialistAgent**: in-process worker producing preview + deliverable
//! - **JobDispatcher**: ordered transports (direct, HTTP, local generation)
//! - **ResponseAggregator**: merges per-specialist output into one invoice
//! - **CoordinatorAgent**: runs the job and returns its `HiringResult`
//!
//! The coordinator never surfaces an error to its caller: anything that
//! goes wrong inside a job becomes a `failed` response.

pub mod aggregate;
pub mod brain;
pub mod classifier;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod specialist;

pub use aggregate::*;
pub use brain::*;
pub use classifier::*;
pub use coordinator::*;
pub use dispatch::*;
pub use error::*;
pub use specialist::*;
