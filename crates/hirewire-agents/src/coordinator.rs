//! Coordinator Agent - runs one job from request to response
//!
//! The coordinator holds no per-job state: each call builds a fresh
//! [`HiringResult`] and hands it back with the response, so one instance can
//! serve concurrent jobs behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use hirewire_marketplace::{HiringResult, SpecialistDirectory, SpecialistSelector};
use hirewire_types::{JobResponse, SkillTag, SpecialistRecord};

use crate::aggregate::{AggregatorConfig, Delivery, ResponseAggregator};
use crate::brain::{AgentBrain, BrainMode};
use crate::classifier::IntentClassifier;
use crate::dispatch::{scoped_description, DirectTransport, HttpTransport, JobDispatcher};
use crate::error::Result;
use crate::specialist::SpecialistAgent;

const COORDINATOR_PROMPT: &str = r#"You are the project manager of a marketplace of AI specialist agents. Your role is to:
1. Understand what the client needs
2. Explain which specialists can help and what they deliver
3. Keep answers short, friendly, and concrete

You hire specialists on the client's behalf; the client pays per job in crypto."#;

const NO_SPECIALIST_MESSAGE: &str =
    "No suitable specialists found for your request. Please try with different requirements.";

const EXAMPLE_REQUESTS: [&str; 3] = [
    "Create an ERC-20 token",
    "Build a React dashboard for my NFT collection",
    "Audit my smart contract for vulnerabilities",
];

/// Coordinator settings
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    pub aggregator: AggregatorConfig,
    /// Timeout for the HTTP dispatch tier
    pub network_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            network_timeout: Duration::from_secs(60),
        }
    }
}

/// A finished job: the public response plus what was hired for it
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub response: JobResponse,
    pub hiring: HiringResult,
}

/// The coordinating agent
pub struct CoordinatorAgent {
    brain: Arc<AgentBrain>,
    classifier: IntentClassifier,
    selector: SpecialistSelector,
    dispatcher: JobDispatcher,
    aggregator: ResponseAggregator,
}

impl CoordinatorAgent {
    /// Coordinator with the standard dispatch chain and one in-process
    /// specialist per built-in skill
    pub fn new(
        brain: Arc<AgentBrain>,
        directory: Arc<dyn SpecialistDirectory>,
        config: CoordinatorConfig,
    ) -> Self {
        let direct = SkillTag::BUILTIN.into_iter().fold(DirectTransport::new(), |direct, skill| {
            let agent = Arc::new(SpecialistAgent::new(skill.clone(), brain.clone()));
            direct.with_handler(skill, agent)
        });

        let dispatcher = JobDispatcher::standard(
            direct,
            HttpTransport::new(config.network_timeout),
            brain.clone(),
        );

        Self {
            brain,
            classifier: IntentClassifier::default(),
            selector: SpecialistSelector::new(directory),
            dispatcher,
            aggregator: ResponseAggregator::new(config.aggregator),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: JobDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn brain(&self) -> &Arc<AgentBrain> {
        &self.brain
    }

    pub fn selector(&self) -> &SpecialistSelector {
        &self.selector
    }

    pub fn dispatcher(&self) -> &JobDispatcher {
        &self.dispatcher
    }

    /// Run one job; errors become a `failed` response
    pub async fn process_user_request(&self, input: &str) -> JobOutcome {
        let job_id = format!("job-{}", uuid::Uuid::new_v4());
        let mut hiring = HiringResult::new();

        tracing::info!(job_id = %job_id, "Processing user request");

        let response = match self.run(&job_id, input, &mut hiring).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Job failed");
                JobResponse::failed(&job_id, format!("Error: {}", e))
            }
        };

        tracing::info!(
            job_id = %job_id,
            status = ?response.status,
            hired = hiring.len(),
            failed_attempts = hiring.attempts().len(),
            "Job finished"
        );

        JobOutcome { response, hiring }
    }

    async fn run(&self, job_id: &str, input: &str, hiring: &mut HiringResult) -> Result<JobResponse> {
        let classification = self.classifier.classify(input);

        if classification.informational {
            tracing::debug!(job_id = %job_id, "Informational request");
            let answer = self.answer_question(input).await?;
            return Ok(JobResponse::completed(job_id, answer));
        }

        if classification.vague {
            tracing::debug!(job_id = %job_id, "Vague request");
            let clarification = self.ask_for_clarification(input).await;
            return Ok(JobResponse::failed(job_id, clarification));
        }

        if classification.skills.is_empty() {
            tracing::debug!(job_id = %job_id, "No skill matched");
            return Ok(JobResponse::failed(job_id, self.skills_menu().await?));
        }

        tracing::info!(
            job_id = %job_id,
            skills = ?classification.skills.iter().map(SkillTag::as_str).collect::<Vec<_>>(),
            "Required skills"
        );

        for skill in &classification.skills {
            self.selector.hire(skill, hiring).await?;
        }

        if hiring.is_empty() {
            return Ok(JobResponse::failed(job_id, NO_SPECIALIST_MESSAGE));
        }

        let hired: Vec<SpecialistRecord> = hiring.hired().to_vec();
        let mut deliveries = Vec::with_capacity(hired.len());

        for record in &hired {
            let job = scoped_description(record, input, &hired);
            let report = self.dispatcher.dispatch(record, &job).await;

            for failure in report.failures {
                hiring.record_attempt(failure);
            }
            if let Some(result) = report.result {
                deliveries.push(Delivery {
                    specialist: record.clone(),
                    result,
                });
            }
        }

        self.aggregator.aggregate(job_id, &deliveries, hiring)
    }

    async fn answer_question(&self, input: &str) -> Result<String> {
        let records = self.selector.directory().list_all().await?;
        let summary = capability_summary(&records);

        if self.brain.mode() == BrainMode::Deterministic {
            return Ok(templated_answer(&summary));
        }

        let context = format!("Available specialists:\n{}", summary);
        match self.brain.generate(COORDINATOR_PROMPT, Some(&context), input).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                tracing::warn!(error = %e, "Informational answer generation failed");
                Ok(templated_answer(&summary))
            }
        }
    }

    async fn ask_for_clarification(&self, input: &str) -> String {
        if self.brain.mode() == BrainMode::Deterministic {
            return templated_clarification();
        }

        let context = format!(
            "The request is too vague to hire anyone. Ask the client for details and suggest example requests such as: {}",
            EXAMPLE_REQUESTS.join("; ")
        );
        match self.brain.generate(COORDINATOR_PROMPT, Some(&context), input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Clarification generation failed");
                templated_clarification()
            }
        }
    }

    async fn skills_menu(&self) -> Result<String> {
        let records = self.selector.directory().list_all().await?;
        Ok(format!(
            "I couldn't match your request to a specialist. I can hire experts for:\n{}\n\nDescribe the work in terms of one of these skills.",
            capability_summary(&records)
        ))
    }
}

/// One line per skill, listing the capabilities of everyone offering it
fn capability_summary(records: &[SpecialistRecord]) -> String {
    let mut skills: Vec<&SkillTag> = Vec::new();
    for record in records {
        if !skills.contains(&&record.specialization) {
            skills.push(&record.specialization);
        }
    }

    skills
        .into_iter()
        .map(|skill| {
            let mut capabilities: Vec<&str> = Vec::new();
            for record in records.iter().filter(|r| &r.specialization == skill) {
                for capability in &record.capabilities {
                    if !capabilities.contains(&capability.as_str()) {
                        capabilities.push(capability);
                    }
                }
            }
            format!("- {}: {}", skill.display_name(), capabilities.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn templated_answer(summary: &str) -> String {
    format!(
        "I coordinate a marketplace of specialist agents. Describe a job and I hire the cheapest \
         qualified specialist for each part of it, collect their work, and send you one invoice.\n\n\
         Specialists available:\n{}",
        summary
    )
}

fn templated_clarification() -> String {
    let examples = EXAMPLE_REQUESTS
        .iter()
        .map(|e| format!("- \"{}\"", e))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Could you tell me more about what you need? For example:\n{}",
        examples
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirewire_marketplace::StaticDirectory;
    use hirewire_types::JobStatus;

    fn coordinator() -> CoordinatorAgent {
        CoordinatorAgent::new(
            Arc::new(AgentBrain::deterministic()),
            Arc::new(StaticDirectory::seeded("http://127.0.0.1:1", "ETH")),
            CoordinatorConfig::default(),
        )
    }

    #[test]
    fn test_capability_summary_groups_by_skill() {
        let directory = StaticDirectory::seeded("http://x", "ETH");
        let summary = capability_summary(directory.records());
        let lines: Vec<_> = summary.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- Solidity: ERC-20 tokens"));
        assert!(lines[2].starts_with("- Security:"));
    }

    #[tokio::test]
    async fn test_informational_has_no_invoice() {
        let outcome = coordinator().process_user_request("what can you do?").await;

        assert_eq!(outcome.response.status, JobStatus::Completed);
        assert!(outcome.response.invoice.is_none());
        assert!(outcome.response.result.contains("Solidity"));
        assert!(outcome.hiring.is_empty());
    }

    #[tokio::test]
    async fn test_vague_asks_for_examples() {
        let outcome = coordinator().process_user_request("help me").await;

        assert_eq!(outcome.response.status, JobStatus::Failed);
        assert!(outcome.response.result.contains("Create an ERC-20 token"));
    }

    #[tokio::test]
    async fn test_unroutable_lists_skills() {
        let outcome = coordinator()
            .process_user_request("Write me a poem about the ocean at sunrise please")
            .await;

        assert_eq!(outcome.response.status, JobStatus::Failed);
        assert!(outcome.response.result.contains("- Frontend:"));
    }

    #[tokio::test]
    async fn test_job_ids_are_unique() {
        let coordinator = coordinator();
        let a = coordinator.process_user_request("help me").await;
        let b = coordinator.process_user_request("help me").await;

        assert!(a.response.job_id.starts_with("job-"));
        assert_ne!(a.response.job_id, b.response.job_id);
    }
}
