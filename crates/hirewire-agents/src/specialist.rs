//! Specialist Agent - in-process worker for one skill
//!
//! Every job costs two generations: a short preview that the client sees
//! before paying, then the complete deliverable unlocked after payment.
//! The invoice is always the listed rate of the record being served.

use std::sync::Arc;

use async_trait::async_trait;
use hirewire_llm::Result as LLMResult;
use hirewire_types::{SkillTag, SpecialistRecord};

use crate::brain::AgentBrain;
use crate::dispatch::{listed_invoice, JobResult, SpecialistHandler};
use crate::error::DispatchError;

const SOLIDITY_PROMPT: &str = r#"You are an expert Solidity smart contract developer. Your role is to:
1. Write secure, efficient Solidity code
2. Implement ERC-20, ERC-721, and other token standards
3. Optimize for gas efficiency
4. Follow established security guidelines
5. Comment the code where intent is not obvious
6. Return the complete contract code as output

Produce production-ready Solidity with error handling, events, and NatSpec documentation."#;

const SECURITY_PROMPT: &str = r#"You are a smart contract security expert. Your role is to:
1. Audit Solidity smart contracts for vulnerabilities
2. Identify security risks and attack vectors
3. Provide detailed vulnerability reports
4. Suggest concrete fixes
5. Rate the security level of the code

For every finding give severity, location, impact, and remediation."#;

const FRONTEND_PROMPT: &str = r#"You are an expert React/Next.js developer. Your role is to:
1. Build responsive user interfaces
2. Implement Web3 integration and wallet interactions
3. Design clean, professional UIs
4. Optimize for performance

Provide clean, production-ready React code."#;

const PREVIEW_INSTRUCTIONS: &str =
    "Keep it brief - 2-3 sentences maximum. This preview is shown to the client before payment.";

const DELIVERABLE_INSTRUCTIONS: &str = "Provide the complete, production-ready work. Include all \
     code, documentation, and details. This is the full deliverable shown after payment.";

/// In-process specialist for one skill tag
#[derive(Debug, Clone)]
pub struct SpecialistAgent {
    skill: SkillTag,
    name: String,
    system_prompt: String,
    capabilities: Vec<String>,
    brain: Arc<AgentBrain>,
}

impl SpecialistAgent {
    pub fn new(skill: SkillTag, brain: Arc<AgentBrain>) -> Self {
        let name = format!("{} Specialist", skill.display_name());
        let system_prompt = system_prompt_for(&skill);
        let capabilities = capabilities_for(&skill);
        Self {
            skill,
            name,
            system_prompt,
            capabilities,
            brain,
        }
    }

    pub fn skill(&self) -> &SkillTag {
        &self.skill
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Produce the preview and the deliverable for `job`, billed at `record`'s rate
    pub async fn process_job(&self, record: &SpecialistRecord, job: &str) -> LLMResult<JobResult> {
        tracing::info!(specialist = %record.id, skill = %self.skill, "Processing job");

        let preview_request = format!(
            "Provide a brief professional preview (2-3 sentences) of what you will deliver for this job: {}",
            job
        );
        let preview = self
            .brain
            .generate(&self.system_prompt, Some(PREVIEW_INSTRUCTIONS), &preview_request)
            .await?;

        let deliverable = self
            .brain
            .generate(&self.system_prompt, Some(DELIVERABLE_INSTRUCTIONS), job)
            .await?;

        Ok(JobResult {
            preview,
            full_result: Some(deliverable),
            invoice: Some(listed_invoice(record)),
        })
    }
}

#[async_trait]
impl SpecialistHandler for SpecialistAgent {
    async fn handle(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError> {
        Ok(self.process_job(record, job).await?)
    }
}

fn system_prompt_for(skill: &SkillTag) -> String {
    match skill {
        SkillTag::Solidity => SOLIDITY_PROMPT.to_string(),
        SkillTag::Security => SECURITY_PROMPT.to_string(),
        SkillTag::Frontend => FRONTEND_PROMPT.to_string(),
        SkillTag::Custom(name) => format!(
            "You are a {} specialist agent. Complete the job requests you receive with high quality output.",
            name
        ),
    }
}

fn capabilities_for(skill: &SkillTag) -> Vec<String> {
    let list: &[&str] = match skill {
        SkillTag::Solidity => &[
            "ERC-20 token creation",
            "ERC-721 NFT contracts",
            "DeFi protocol development",
            "Smart contract optimization",
            "Gas optimization",
        ],
        SkillTag::Security => &[
            "Vulnerability analysis",
            "Code auditing",
            "Risk assessment",
            "Security recommendations",
            "Compliance checking",
        ],
        SkillTag::Frontend => &[
            "React/Next.js development",
            "Web3 integration",
            "Wallet connection",
            "UI/UX design",
            "Performance optimization",
        ],
        SkillTag::Custom(name) => return vec![format!("General work in {}", name)],
    };
    list.iter().map(|c| c.to_string()).collect()
}
