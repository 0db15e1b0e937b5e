//! HireWire Marketplace - Specialist directory and selection
//!
//! Specialists compete on price within a specialization:
//! - Directory: read-only listing of priced specialists, injectable so a
//!   live registry can replace the seeded table
//! - Selector: resolves a skill to its cheapest specialist and records the
//!   competing offers for display
//! - Hiring: the job-scoped set of hired specialists plus dispatch diagnostics

pub use hirewire_types::{PriceComparison, PriceOption, SkillTag, SpecialistRecord};

pub mod directory;
pub mod error;
pub mod hiring;
pub mod selector;

pub use directory::*;
pub use error::*;
pub use hiring::*;
pub use selector::*;
