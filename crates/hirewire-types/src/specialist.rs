//! Specialist records - the directory's listing of priced providers

use crate::{PriceOption, SkillTag, TokenAmount};
use serde::{Deserialize, Serialize};

/// A priced provider of one skill
///
/// Records are immutable once loaded. Several records may share a
/// specialization; they compete on `rate`. Serialized as the agent card
/// served by `/registry` and `/specialist/{type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistRecord {
    /// Unique specialist id (hired sets are keyed by it)
    pub id: String,
    /// Display name
    pub name: String,
    /// Human-readable role
    pub role: String,
    /// Skill this specialist is routed for
    pub specialization: SkillTag,
    /// Price per job
    pub rate: TokenAmount,
    /// Token symbol the rate is quoted in
    pub currency: String,
    /// Network endpoint for the specialist (tier-2 dispatch target)
    #[serde(rename = "url")]
    pub endpoint: String,
    /// Payment address
    pub address: String,
    /// Ordered capability list
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl SpecialistRecord {
    /// Capabilities joined for prompts and menus
    pub fn capability_summary(&self) -> String {
        self.capabilities.join(", ")
    }

    /// Entry used in price comparisons
    pub fn price_option(&self) -> PriceOption {
        PriceOption {
            name: self.name.clone(),
            rate: self.rate.to_string(),
            address: self.address.clone(),
        }
    }
}
