//! Job dispatch
//!
//! A specialist's output is obtained by trying an ordered list of
//! [`DispatchTransport`]s until one succeeds. The standard order is:
//!
//! 1. `direct` - an in-process [`SpecialistHandler`] registered for the skill
//! 2. `http` - POST `{ "job": ... }` to the specialist's endpoint
//! 3. `local` - prompt the brain to act as the specialist
//!
//! Each failed tier is logged and reported; nothing is retried.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hirewire_marketplace::DispatchAttempt;
use hirewire_types::{
    Invoice, InvoiceFragment, JobResponse, JobStatus, SkillTag, SpecialistJobRequest,
    SpecialistRecord, SpecialistReply,
};

use crate::brain::AgentBrain;
use crate::error::DispatchError;

/// Maximum preview length when a preview has to be cut from a deliverable
pub const PREVIEW_MAX_CHARS: usize = 280;

/// One specialist's output for one job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobResult {
    /// Short text shown before payment
    pub preview: String,
    /// Complete deliverable shown after payment
    pub full_result: Option<String>,
    pub invoice: Option<InvoiceFragment>,
}

impl JobResult {
    /// Enforce the post-dispatch shape: non-empty preview, full result set
    pub fn normalized(mut self, record: &SpecialistRecord) -> Self {
        if self.preview.trim().is_empty() {
            self.preview = format!(
                "{} accepted the job and is preparing the {} work.",
                record.name,
                record.specialization.display_name().to_lowercase()
            );
        }
        if self.full_result.as_deref().map_or(true, |f| f.trim().is_empty()) {
            self.full_result = Some(self.preview.clone());
        }
        self
    }

    /// Public response for a single specialist's job
    pub fn into_response(self, job_id: impl Into<String>) -> JobResponse {
        JobResponse {
            job_id: job_id.into(),
            status: JobStatus::Completed,
            result: self.preview,
            full_result: self.full_result,
            invoice: self.invoice.map(|fragment| Invoice {
                amount: fragment.amount,
                currency: fragment.currency,
                to: fragment.to,
                description: fragment.description,
                breakdown: None,
            }),
            price_comparison: None,
        }
    }
}

impl From<SpecialistReply> for JobResult {
    fn from(reply: SpecialistReply) -> Self {
        Self {
            preview: reply.result,
            full_result: reply.full_result,
            invoice: reply.invoice,
        }
    }
}

/// Invoice fragment built from a specialist's listed rate
pub fn listed_invoice(record: &SpecialistRecord) -> InvoiceFragment {
    InvoiceFragment {
        amount: record.rate.to_string(),
        currency: record.currency.clone(),
        to: record.address.clone(),
        description: format!(
            "{} work completed by {}",
            record.specialization.display_name(),
            record.name
        ),
    }
}

/// First paragraph of `text`, cut to [`PREVIEW_MAX_CHARS`]
pub fn preview_of(text: &str) -> String {
    let paragraph = text
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or("");

    if paragraph.chars().count() <= PREVIEW_MAX_CHARS {
        return paragraph.to_string();
    }

    let cut: String = paragraph.chars().take(PREVIEW_MAX_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}

/// In-process worker for one skill
#[async_trait]
pub trait SpecialistHandler: Send + Sync {
    async fn handle(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError>;
}

/// One way of reaching a specialist
#[async_trait]
pub trait DispatchTransport: Send + Sync {
    /// Tier name used in logs and diagnostics
    fn name(&self) -> &'static str;

    async fn attempt(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError>;
}

/// Tier 1: in-process handlers keyed by skill
#[derive(Default, Clone)]
pub struct DirectTransport {
    handlers: HashMap<SkillTag, Arc<dyn SpecialistHandler>>,
}

impl DirectTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, skill: SkillTag, handler: Arc<dyn SpecialistHandler>) {
        self.handlers.insert(skill, handler);
    }

    pub fn with_handler(mut self, skill: SkillTag, handler: Arc<dyn SpecialistHandler>) -> Self {
        self.register(skill, handler);
        self
    }

    pub fn handler(&self, skill: &SkillTag) -> Option<&Arc<dyn SpecialistHandler>> {
        self.handlers.get(skill)
    }
}

#[async_trait]
impl DispatchTransport for DirectTransport {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn attempt(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError> {
        let handler = self
            .handlers
            .get(&record.specialization)
            .ok_or_else(|| DispatchError::NoHandler {
                skill: record.specialization.to_string(),
            })?;
        handler.handle(record, job).await
    }
}

/// Tier 2: the specialist's network endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client with timeout, using defaults");
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[async_trait]
impl DispatchTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn attempt(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError> {
        let response = self
            .client
            .post(&record.endpoint)
            .json(&SpecialistJobRequest {
                job: job.to_string(),
            })
            .send()
            .await
            .map_err(|e| DispatchError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| DispatchError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(DispatchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: SpecialistReply =
            serde_json::from_str(&body).map_err(|e| DispatchError::MalformedReply {
                message: e.to_string(),
            })?;

        if reply.status == Some(JobStatus::Failed) {
            return Err(DispatchError::SpecialistFailed {
                message: reply.result,
            });
        }

        Ok(reply.into())
    }
}

/// Tier 3: generate the work locally in the specialist's voice
#[derive(Debug, Clone)]
pub struct LocalFallbackTransport {
    brain: Arc<AgentBrain>,
}

impl LocalFallbackTransport {
    pub fn new(brain: Arc<AgentBrain>) -> Self {
        Self { brain }
    }
}

#[async_trait]
impl DispatchTransport for LocalFallbackTransport {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn attempt(&self, record: &SpecialistRecord, job: &str) -> Result<JobResult, DispatchError> {
        let system = format!(
            "Act as {}, a {} specializing in {}. Your capabilities: {}. \
             Complete the job you receive with production-quality output.",
            record.name,
            record.role,
            record.specialization,
            record.capability_summary()
        );

        let deliverable = self.brain.generate(&system, None, job).await?;

        Ok(JobResult {
            preview: preview_of(&deliverable),
            full_result: Some(deliverable),
            invoice: Some(listed_invoice(record)),
        })
    }
}

/// Result of dispatching one specialist
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Normalized output, `None` when every tier failed
    pub result: Option<JobResult>,
    /// One entry per failed tier, in the order tried
    pub failures: Vec<DispatchAttempt>,
}

/// Tries transports in order; first success wins
#[derive(Clone)]
pub struct JobDispatcher {
    transports: Vec<Arc<dyn DispatchTransport>>,
}

impl JobDispatcher {
    pub fn new(transports: Vec<Arc<dyn DispatchTransport>>) -> Self {
        Self { transports }
    }

    /// Direct, then HTTP, then local generation
    pub fn standard(direct: DirectTransport, http: HttpTransport, brain: Arc<AgentBrain>) -> Self {
        let transports: Vec<Arc<dyn DispatchTransport>> = vec![
            Arc::new(direct),
            Arc::new(http),
            Arc::new(LocalFallbackTransport::new(brain)),
        ];
        Self::new(transports)
    }

    pub fn transport_names(&self) -> Vec<&'static str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    pub async fn dispatch(&self, record: &SpecialistRecord, job: &str) -> DispatchReport {
        let mut report = DispatchReport::default();

        for transport in &self.transports {
            match transport.attempt(record, job).await {
                Ok(result) => {
                    tracing::info!(
                        specialist = %record.id,
                        tier = transport.name(),
                        "Specialist delivered"
                    );
                    report.result = Some(result.normalized(record));
                    return report;
                }
                Err(e) => {
                    tracing::warn!(
                        specialist = %record.id,
                        tier = transport.name(),
                        error = %e,
                        "Dispatch tier failed"
                    );
                    report.failures.push(DispatchAttempt {
                        specialist_id: record.id.clone(),
                        tier: transport.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::warn!(specialist = %record.id, "All dispatch tiers failed");
        report
    }
}

/// Job text for one specialist when several share a job
///
/// With a single hire the request passes through untouched. Otherwise each
/// specialist is told to deliver only its own slice.
pub fn scoped_description(record: &SpecialistRecord, job: &str, hired: &[SpecialistRecord]) -> String {
    if hired.len() <= 1 {
        return job.to_string();
    }

    let others = hired
        .iter()
        .filter(|r| r.id != record.id)
        .map(|r| format!("{} ({})", r.name, r.specialization))
        .collect::<Vec<_>>()
        .join(", ");

    let scope = match &record.specialization {
        SkillTag::Solidity => "Deliver ONLY the Solidity smart contract code for this request. \
             Do NOT write any frontend, React or UI code; another specialist builds the interface."
            .to_string(),
        SkillTag::Frontend => "Deliver ONLY the React/Next.js frontend code for this request. \
             Do NOT write any Solidity or smart contract code; assume the contracts are delivered \
             by another specialist and integrate with them through their ABI."
            .to_string(),
        SkillTag::Security => "Audit the smart contract design for this request and report \
             vulnerabilities, risks and recommended fixes. Do NOT author contract or frontend code."
            .to_string(),
        SkillTag::Custom(skill) => format!(
            "Deliver ONLY the {} part of this request. Leave every other part to the other specialists.",
            skill
        ),
    };

    format!(
        "{}\n\nYou are one of {} specialists hired for this job. Other specialists: {}.\n\nOriginal request: {}",
        scope,
        hired.len(),
        others,
        job
    )
}
