//! Specialist directory

use async_trait::async_trait;
use hirewire_types::{SkillTag, SpecialistRecord, TokenAmount, DEFAULT_CURRENCY};

use crate::error::Result;

/// Read-only source of specialist records
///
/// Iteration order is significant: the selector breaks rate ties in favour
/// of the record listed first.
#[async_trait]
pub trait SpecialistDirectory: Send + Sync {
    /// Records whose specialization equals `skill`, in directory order
    async fn list_by_skill(&self, skill: &SkillTag) -> Result<Vec<SpecialistRecord>>;

    /// Every record, in directory order
    async fn list_all(&self) -> Result<Vec<SpecialistRecord>>;
}

/// In-memory directory populated once at startup
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: Vec<SpecialistRecord>,
}

impl StaticDirectory {
    pub fn new(records: Vec<SpecialistRecord>) -> Self {
        Self { records }
    }

    /// The demo marketplace: competing specialists for each built-in skill
    ///
    /// Endpoints point at `{base_url}/specialist/{skill}`.
    pub fn seeded(base_url: &str, currency: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let records = SEED
            .iter()
            .map(|seed| seed.to_record(base_url, currency))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SpecialistRecord] {
        &self.records
    }
}

#[async_trait]
impl SpecialistDirectory for StaticDirectory {
    async fn list_by_skill(&self, skill: &SkillTag) -> Result<Vec<SpecialistRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| &r.specialization == skill)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<SpecialistRecord>> {
        Ok(self.records.clone())
    }
}

struct SeedRecord {
    id: &'static str,
    name: &'static str,
    role: &'static str,
    skill: &'static str,
    /// Rate in wei-style base units (18 decimals)
    rate_units: i128,
    address: &'static str,
    capabilities: &'static [&'static str],
}

impl SeedRecord {
    fn to_record(&self, base_url: &str, currency: &str) -> SpecialistRecord {
        let currency = if currency.is_empty() {
            DEFAULT_CURRENCY
        } else {
            currency
        };
        let skill = SkillTag::from_tag(self.skill);
        SpecialistRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            role: self.role.to_string(),
            specialization: skill.clone(),
            rate: TokenAmount::from_units(self.rate_units),
            currency: currency.to_string(),
            endpoint: format!("{}/specialist/{}", base_url, skill),
            address: self.address.to_string(),
            capabilities: self.capabilities.iter().map(|c| c.to_string()).collect(),
        }
    }
}

const MILLI_ETH: i128 = 1_000_000_000_000_000;

const SEED: &[SeedRecord] = &[
    SeedRecord {
        id: "solidity-001",
        name: "Solidity Coder",
        role: "Smart Contract Developer",
        skill: "solidity",
        rate_units: MILLI_ETH / 2,
        address: "0x5a1d17c0de000000000000000000000000000001",
        capabilities: &["ERC-20 tokens", "Smart contracts", "Solidity optimization"],
    },
    SeedRecord {
        id: "solidity-002",
        name: "Contract Forge",
        role: "Smart Contract Developer",
        skill: "solidity",
        rate_units: MILLI_ETH * 6 / 10,
        address: "0x5a1d17c0de000000000000000000000000000002",
        capabilities: &["ERC-721 and ERC-1155", "Upgradeable proxies", "Gas optimization"],
    },
    SeedRecord {
        id: "solidity-003",
        name: "ChainSmith",
        role: "DeFi Protocol Engineer",
        skill: "solidity",
        rate_units: MILLI_ETH * 7 / 10,
        address: "0x5a1d17c0de000000000000000000000000000003",
        capabilities: &["DeFi protocols", "Staking and vesting", "Foundry test suites"],
    },
    SeedRecord {
        id: "frontend-001",
        name: "Frontend Builder",
        role: "Web3 Frontend Developer",
        skill: "frontend",
        rate_units: MILLI_ETH * 6 / 10,
        address: "0xf407e2d000000000000000000000000000000001",
        capabilities: &["React components", "Next.js apps", "Wallet integration"],
    },
    SeedRecord {
        id: "frontend-002",
        name: "Pixel Labs",
        role: "UI Engineer",
        skill: "frontend",
        rate_units: MILLI_ETH * 8 / 10,
        address: "0xf407e2d000000000000000000000000000000002",
        capabilities: &["Tailwind design systems", "Dashboards", "Responsive layouts"],
    },
    SeedRecord {
        id: "security-001",
        name: "Security Auditor",
        role: "Smart Contract Security Expert",
        skill: "security",
        rate_units: MILLI_ETH,
        address: "0x5ec0a0d170000000000000000000000000000001",
        capabilities: &["Vulnerability analysis", "Code audit", "Security recommendations"],
    },
    SeedRecord {
        id: "security-002",
        name: "Audit Sentinel",
        role: "Penetration Tester",
        skill: "security",
        rate_units: MILLI_ETH * 12 / 10,
        address: "0x5ec0a0d170000000000000000000000000000002",
        capabilities: &["Penetration testing", "Threat modeling", "Formal verification"],
    },
];
