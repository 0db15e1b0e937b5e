//! API Integration Tests
//!
//! Drives the router through `oneshot` with a deterministic brain and the
//! seeded directory, so no network or model is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use hirewire_agents::{AgentBrain, CoordinatorAgent, CoordinatorConfig};
use hirewire_api::{create_router, create_test_router, ApiConfig, AppState};
use hirewire_marketplace::StaticDirectory;

/// Router over the seeded directory; HTTP dispatch targets an unused port
fn test_router() -> Router {
    let coordinator = CoordinatorAgent::new(
        Arc::new(AgentBrain::deterministic()),
        Arc::new(StaticDirectory::seeded("http://127.0.0.1:1", "ETH")),
        CoordinatorConfig::default(),
    );
    create_test_router(Arc::new(AppState::new(Arc::new(coordinator))))
}

/// Test helper to make a request and get JSON response
async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    let body = if let Some(json_body) = body {
        Body::from(serde_json::to_vec(&json_body).unwrap())
    } else {
        Body::empty()
    };

    let request = request.body(body).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));

    (status, json)
}

// =============================================================================
// Health
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["llmProvider"], "deterministic");
        assert!(json["timestamp"].is_string());
        assert_eq!(json["endpoints"]["manager"], "POST /manager");
    }

    #[tokio::test]
    async fn test_root_serves_health() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_full_router_sets_request_id() {
        let coordinator = CoordinatorAgent::new(
            Arc::new(AgentBrain::deterministic()),
            Arc::new(StaticDirectory::seeded("http://127.0.0.1:1", "ETH")),
            CoordinatorConfig::default(),
        );
        let router = create_router(
            Arc::new(AppState::new(Arc::new(coordinator))),
            ApiConfig::default(),
        );

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}

// =============================================================================
// Coordinator
// =============================================================================

mod jobs {
    use super::*;

    #[tokio::test]
    async fn test_manager_requires_message() {
        let router = test_router();
        let (status, json) = json_request(&router, "POST", "/manager", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing 'message' field");
    }

    #[tokio::test]
    async fn test_manager_rejects_blank_message() {
        let router = test_router();
        let (status, _) =
            json_request(&router, "POST", "/manager", Some(json!({ "message": "   " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_manager_rejects_malformed_json() {
        let router = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/manager")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_manager_hires_two_specialists() {
        let router = test_router();
        let (status, json) = json_request(
            &router,
            "POST",
            "/manager",
            Some(json!({ "message": "Build a React component with a smart contract for an NFT" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "completed");
        assert!(json["jobId"].as_str().unwrap().starts_with("job-"));
        assert_eq!(json["invoice"]["amount"], "0.0011");
        assert_eq!(json["invoice"]["currency"], "ETH");
        assert_eq!(json["invoice"]["breakdown"].as_array().unwrap().len(), 2);
        assert_eq!(json["priceComparison"]["specialization"], "solidity");
    }

    #[tokio::test]
    async fn test_vague_request_asks_for_detail() {
        let router = test_router();
        let (status, json) =
            json_request(&router, "POST", "/manager", Some(json!({ "message": "help" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "failed");
        assert!(json["result"].as_str().unwrap().contains("Create an ERC-20 token"));
        assert!(json.get("invoice").is_none());
    }

    #[tokio::test]
    async fn test_process_requires_request() {
        let router = test_router();
        let (status, json) = json_request(
            &router,
            "POST",
            "/process",
            Some(json!({ "message": "Create an ERC-20 token" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing 'request' field");
    }

    #[tokio::test]
    async fn test_process_runs_job() {
        let router = test_router();
        let (status, json) = json_request(
            &router,
            "POST",
            "/process",
            Some(json!({ "request": "Please run a security audit on my codebase" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["invoice"]["amount"], "0.001");
        assert!(json["invoice"].get("breakdown").is_none());
    }
}

// =============================================================================
// Specialists
// =============================================================================

mod specialists {
    use super::*;

    #[tokio::test]
    async fn test_registry_lists_seed() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/registry", None).await;

        assert_eq!(status, StatusCode::OK);
        let specialists = json["specialists"].as_array().unwrap();
        assert_eq!(specialists.len(), 7);
        assert!(specialists.iter().any(|s| s["id"] == "security-002"));
    }

    #[tokio::test]
    async fn test_agent_card_is_cheapest() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/specialist/solidity", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "solidity-001");
        assert_eq!(json["rate"], "0.0005");
        assert_eq!(json["url"], "http://127.0.0.1:1/specialist/solidity");
    }

    #[tokio::test]
    async fn test_unknown_specialist_type() {
        let router = test_router();
        let (status, json) = json_request(&router, "GET", "/specialist/painter", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Specialist not found");
    }

    #[tokio::test]
    async fn test_specialist_job_requires_job() {
        let router = test_router();
        let (status, json) =
            json_request(&router, "POST", "/specialist/frontend", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing 'job' field");
    }

    #[tokio::test]
    async fn test_specialist_job_bills_listed_rate() {
        let router = test_router();
        let (status, json) = json_request(
            &router,
            "POST",
            "/specialist/frontend",
            Some(json!({ "job": "Build a pricing page" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "completed");
        assert!(!json["result"].as_str().unwrap().is_empty());
        assert!(json["fullResult"].is_string());
        assert_eq!(json["invoice"]["amount"], "0.0006");
        assert_eq!(json["invoice"]["description"], "Frontend work completed by Frontend Builder");
    }
}
