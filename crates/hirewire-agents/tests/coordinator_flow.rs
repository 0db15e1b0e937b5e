//! End-to-end coordinator scenarios
//!
//! These run without network access: generation comes from the
//! deterministic provider or scripted providers, and the HTTP tier talks to
//! a throwaway axum specialist bound to 127.0.0.1:0.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use hirewire_agents::{
    AgentBrain, CoordinatorAgent, CoordinatorConfig, DispatchError, DispatchTransport,
    JobDispatcher, JobResult,
};
use hirewire_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, LLMRouter, ProviderKind,
};
use hirewire_marketplace::{MarketplaceError, SpecialistDirectory, StaticDirectory};
use hirewire_types::{InvoiceFragment, JobStatus, SkillTag, SpecialistRecord};

// ============================================================================
// Scripted collaborators
// ============================================================================

/// A model that is configured but always errors
struct FailingProvider;

#[async_trait]
impl LLMProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "Failing"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAICompat
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, _request: CompletionRequest) -> hirewire_llm::Result<CompletionResponse> {
        Err(LLMError::NetworkError {
            message: "connection refused".to_string(),
        })
    }
}

/// Records every prompt and answers with a numbered reply
#[derive(Default)]
struct RecordingProvider {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "Recording"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAICompat
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, request: CompletionRequest) -> hirewire_llm::Result<CompletionResponse> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(request.last_user_message().unwrap_or_default().to_string());
        Ok(CompletionResponse::new(format!("reply {}", prompts.len())))
    }
}

struct UnavailableDirectory;

#[async_trait]
impl SpecialistDirectory for UnavailableDirectory {
    async fn list_by_skill(
        &self,
        _skill: &SkillTag,
    ) -> hirewire_marketplace::Result<Vec<SpecialistRecord>> {
        Err(MarketplaceError::DirectoryUnavailable {
            message: "registry offline".to_string(),
        })
    }

    async fn list_all(&self) -> hirewire_marketplace::Result<Vec<SpecialistRecord>> {
        Err(MarketplaceError::DirectoryUnavailable {
            message: "registry offline".to_string(),
        })
    }
}

/// Delivers for Solidity specialists and fails for everyone else
struct SolidityOnlyTransport {
    name: &'static str,
}

#[async_trait]
impl DispatchTransport for SolidityOnlyTransport {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(
        &self,
        record: &SpecialistRecord,
        _job: &str,
    ) -> Result<JobResult, DispatchError> {
        if record.specialization != SkillTag::Solidity {
            return Err(DispatchError::SpecialistFailed {
                message: format!("{} unreachable", record.name),
            });
        }

        Ok(JobResult {
            preview: "Contract preview".to_string(),
            full_result: Some("contract Vault {}".to_string()),
            invoice: Some(InvoiceFragment {
                amount: "0.0005".to_string(),
                currency: "ETH".to_string(),
                to: record.address.clone(),
                description: String::new(),
            }),
        })
    }
}

/// Serve a fixed reply on `POST /specialist/:type`, returning the base URL
async fn spawn_specialist(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/specialist/:type",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn coordinator(brain: AgentBrain, directory: StaticDirectory) -> CoordinatorAgent {
    CoordinatorAgent::new(Arc::new(brain), Arc::new(directory), CoordinatorConfig::default())
}

fn failing_brain() -> AgentBrain {
    AgentBrain::with_llm(LLMRouter::new(Arc::new(FailingProvider)))
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_frontend_and_contract_job() {
    let coordinator = coordinator(
        AgentBrain::deterministic(),
        StaticDirectory::seeded("http://127.0.0.1:1", "ETH"),
    );

    let outcome = coordinator
        .process_user_request("Build a React component with a smart contract for an NFT")
        .await;
    let response = outcome.response;

    assert_eq!(response.status, JobStatus::Completed);
    assert!(response.result.contains("\n\n---\n\n"));

    let invoice = response.invoice.expect("invoice");
    assert_eq!(invoice.amount, "0.0011");
    assert_eq!(invoice.currency, "ETH");
    assert_eq!(invoice.to, "0x5a1d17c0de000000000000000000000000000001");
    assert_eq!(invoice.breakdown.expect("breakdown").len(), 2);

    let comparison = response.price_comparison.expect("price comparison");
    assert_eq!(comparison.specialization, "solidity");
    assert_eq!(comparison.options.len(), 3);
    assert_eq!(comparison.selected.rate, "0.0005");

    let hired: Vec<_> = outcome.hiring.hired().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(hired, vec!["solidity-001", "frontend-001"]);
    assert_eq!(outcome.hiring.comparisons().len(), 2);
    assert!(outcome.hiring.attempts().is_empty());
}

#[tokio::test]
async fn test_security_only_job() {
    let coordinator = coordinator(
        AgentBrain::deterministic(),
        StaticDirectory::seeded("http://127.0.0.1:1", "ETH"),
    );

    let outcome = coordinator
        .process_user_request("Please run a security audit on my codebase")
        .await;

    assert_eq!(outcome.response.status, JobStatus::Completed);
    assert_eq!(outcome.hiring.len(), 1);
    assert_eq!(outcome.hiring.hired()[0].specialization, SkillTag::Security);

    let invoice = outcome.response.invoice.unwrap();
    assert_eq!(invoice.amount, "0.001");
    assert!(invoice.breakdown.is_none());
}

#[tokio::test]
async fn test_http_tier_used_when_direct_fails() {
    let base = spawn_specialist(
        StatusCode::OK,
        json!({
            "jobId": "job-remote",
            "status": "completed",
            "result": "Remote preview",
            "fullResult": "Remote contract",
            "invoice": { "amount": "0.02", "currency": "ETH", "to": "0xremote", "description": "remote" }
        }),
    )
    .await;

    let coordinator = coordinator(failing_brain(), StaticDirectory::seeded(&base, "ETH"));
    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Completed);
    assert_eq!(outcome.response.result, "Remote preview");
    assert_eq!(outcome.response.full_result.as_deref(), Some("Remote contract"));

    let invoice = outcome.response.invoice.unwrap();
    assert_eq!(invoice.amount, "0.02");
    assert_eq!(invoice.to, "0xremote");

    let attempts = outcome.hiring.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].tier, "direct");
}

#[tokio::test]
async fn test_all_tiers_fail() {
    let base = spawn_specialist(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;

    let coordinator = coordinator(failing_brain(), StaticDirectory::seeded(&base, "ETH"));
    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Failed);
    assert!(outcome.response.result.contains("failed to deliver"));
    assert!(outcome.response.invoice.is_none());

    let tiers: Vec<_> = outcome.hiring.attempts().iter().map(|a| a.tier.as_str()).collect();
    assert_eq!(tiers, vec!["direct", "http", "local"]);
}

#[tokio::test]
async fn test_one_specialist_exhausts_tiers_others_deliver() {
    let transports: Vec<Arc<dyn DispatchTransport>> = ["direct", "http", "local"]
        .into_iter()
        .map(|name| Arc::new(SolidityOnlyTransport { name }) as Arc<dyn DispatchTransport>)
        .collect();

    let coordinator = coordinator(
        AgentBrain::deterministic(),
        StaticDirectory::seeded("http://127.0.0.1:1", "ETH"),
    )
    .with_dispatcher(JobDispatcher::new(transports));

    let outcome = coordinator
        .process_user_request("Build a React component with a smart contract for an NFT")
        .await;
    assert_eq!(outcome.hiring.len(), 2);

    let response = outcome.response;
    assert_eq!(response.status, JobStatus::Completed);
    assert_eq!(response.result, "Contract preview");
    assert!(!response.result.contains("\n\n---\n\n"));
    assert_eq!(response.full_result.as_deref(), Some("contract Vault {}"));

    let invoice = response.invoice.expect("invoice");
    assert_eq!(invoice.amount, "0.0005");
    assert_eq!(invoice.to, "0x5a1d17c0de000000000000000000000000000001");

    let attempts = outcome.hiring.attempts();
    assert_eq!(attempts.len(), 3);
    assert!(attempts.iter().all(|a| a.specialist_id == "frontend-001"));
    let tiers: Vec<_> = attempts.iter().map(|a| a.tier.as_str()).collect();
    assert_eq!(tiers, vec!["direct", "http", "local"]);
}

#[tokio::test]
async fn test_failed_status_in_reply_falls_through() {
    let base = spawn_specialist(
        StatusCode::OK,
        json!({ "jobId": "job-x", "status": "failed", "result": "Error: quota" }),
    )
    .await;

    let coordinator = coordinator(failing_brain(), StaticDirectory::seeded(&base, "ETH"));
    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Failed);
    let http = &outcome.hiring.attempts()[1];
    assert_eq!(http.tier, "http");
    assert!(http.error.contains("quota"));
}

#[tokio::test]
async fn test_reply_without_result_falls_through() {
    let base = spawn_specialist(StatusCode::OK, json!({ "fullResult": "no preview" })).await;

    let coordinator = coordinator(failing_brain(), StaticDirectory::seeded(&base, "ETH"));
    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Failed);
    assert!(outcome.hiring.attempts()[1].error.contains("Malformed"));
}

#[tokio::test]
async fn test_specialists_receive_scoped_jobs() {
    let provider = Arc::new(RecordingProvider::default());
    let brain = AgentBrain::with_llm(LLMRouter::new(provider.clone()));
    let coordinator = coordinator(brain, StaticDirectory::seeded("http://127.0.0.1:1", "ETH"));

    let outcome = coordinator
        .process_user_request("Write a solidity vault and a tailwind landing page")
        .await;
    assert_eq!(outcome.response.status, JobStatus::Completed);

    let prompts = provider.prompts.lock().unwrap();
    // Preview and deliverable for each of the two specialists
    assert_eq!(prompts.len(), 4);
    assert!(prompts.iter().any(|p| p.contains("Do NOT write any frontend")));
    assert!(prompts.iter().any(|p| p.contains("Do NOT write any Solidity")));
}

#[tokio::test]
async fn test_directory_failure_becomes_failed_job() {
    let coordinator = CoordinatorAgent::new(
        Arc::new(AgentBrain::deterministic()),
        Arc::new(UnavailableDirectory),
        CoordinatorConfig::default(),
    );

    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Failed);
    assert!(outcome.response.result.starts_with("Error:"));
    assert!(outcome.response.result.contains("registry offline"));
}

#[tokio::test]
async fn test_skill_without_specialists() {
    let coordinator = coordinator(
        AgentBrain::deterministic(),
        StaticDirectory::new(Vec::new()),
    );

    let outcome = coordinator.process_user_request("Create an ERC-20 token").await;

    assert_eq!(outcome.response.status, JobStatus::Failed);
    assert!(outcome.response.result.contains("No suitable specialists"));
}

#[tokio::test]
async fn test_concurrent_jobs_keep_separate_hiring() {
    let coordinator = Arc::new(coordinator(
        AgentBrain::deterministic(),
        StaticDirectory::seeded("http://127.0.0.1:1", "ETH"),
    ));

    let (a, b) = tokio::join!(
        coordinator.process_user_request("Create an ERC-20 token"),
        coordinator.process_user_request("Please run a security audit on my codebase"),
    );

    assert_eq!(a.hiring.hired()[0].specialization, SkillTag::Solidity);
    assert_eq!(b.hiring.hired()[0].specialization, SkillTag::Security);
    assert_eq!(a.hiring.len(), 1);
    assert_eq!(b.hiring.len(), 1);
}

#[tokio::test]
async fn test_informational_falls_back_to_template() {
    let coordinator = coordinator(failing_brain(), StaticDirectory::seeded("http://127.0.0.1:1", "ETH"));

    let outcome = coordinator.process_user_request("What services do you offer?").await;

    assert_eq!(outcome.response.status, JobStatus::Completed);
    assert!(outcome.response.result.contains("Specialists available"));
    assert!(outcome.response.invoice.is_none());
}
