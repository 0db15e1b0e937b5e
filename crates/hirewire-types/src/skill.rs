//! Skill tags - the routing categories that match user intent to specialists

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of work a specialist offers
///
/// The three built-in tags are the ones the intent classifier knows how to
/// detect. `Custom` keeps the set open so a directory can list specialists
/// the classifier cannot route to yet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillTag {
    /// Smart contract development
    Solidity,
    /// React / Next.js / web3 frontend work
    Frontend,
    /// Security auditing
    Security,
    /// Any other specialization
    Custom(String),
}

impl SkillTag {
    /// The built-in tags, in hire order
    pub const BUILTIN: [SkillTag; 3] = [SkillTag::Solidity, SkillTag::Frontend, SkillTag::Security];

    /// Parse a tag; unknown names become `Custom` (lowercased)
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "solidity" => Self::Solidity,
            "frontend" => Self::Frontend,
            "security" => Self::Security,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Wire name of the tag
    pub fn as_str(&self) -> &str {
        match self {
            Self::Solidity => "solidity",
            Self::Frontend => "frontend",
            Self::Security => "security",
            Self::Custom(name) => name,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        match self {
            Self::Solidity => "Solidity".to_string(),
            Self::Frontend => "Frontend".to_string(),
            Self::Security => "Security".to_string(),
            Self::Custom(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl fmt::Display for SkillTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for SkillTag {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<SkillTag> for String {
    fn from(value: SkillTag) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(SkillTag::from_tag("Solidity"), SkillTag::Solidity);
        assert_eq!(SkillTag::from_tag(" security "), SkillTag::Security);
        assert_eq!(
            SkillTag::from_tag("Design"),
            SkillTag::Custom("design".to_string())
        );
    }

    #[test]
    fn test_serde_round_trips_through_wire_name() {
        let json = serde_json::to_string(&SkillTag::Frontend).unwrap();
        assert_eq!(json, "\"frontend\"");

        let custom: SkillTag = serde_json::from_str("\"devops\"").unwrap();
        assert_eq!(custom.display_name(), "Devops");
    }

    #[test]
    fn test_hire_order() {
        assert!(SkillTag::Solidity < SkillTag::Frontend);
        assert!(SkillTag::Frontend < SkillTag::Security);
    }
}
