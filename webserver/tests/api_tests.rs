//! HTTP surface tests over a mocked extraction engine

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use extractor::{
    EnhancedProfile, ExtractionOutcome, ExtractorError, MockExtractionEngine, Persona,
    WorkstreamFailure, WorkstreamId,
};
use shared::{ExtractionId, Phase, ProviderId};
use webserver::{AppState, WebServer};

fn sample_outcome() -> ExtractionOutcome {
    let mut profile = EnhancedProfile::default();
    profile.customer_triggers = vec!["new baby".to_string()];
    profile.pain_points = vec!["no time".to_string()];
    profile.personas = vec![Persona {
        name: "Busy Parent".to_string(),
        summary: "time-poor".to_string(),
        goals: vec!["fitness".to_string()],
        frustrations: vec![],
    }];
    profile.validation_score = 86;

    ExtractionOutcome {
        extraction_id: ExtractionId::new(),
        profile,
        parallel_calls: 5,
        extraction_time_ms: 1200,
        phase: Phase::All,
    }
}

fn server(engine: MockExtractionEngine) -> WebServer<MockExtractionEngine> {
    let state = AppState::new(vec![ProviderId::OpenRouter, ProviderId::OpenAI], 2);
    WebServer::new(engine, state)
}

fn extract_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/extract")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn valid_body() -> Value {
    json!({
        "websiteContent": "We coach busy parents back to fitness.",
        "businessName": "Acme Fitness",
        "industry": "fitness"
    })
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn extract_returns_flattened_profile() {
    let mut engine = MockExtractionEngine::new();
    engine
        .expect_extract()
        .times(1)
        .returning(|_| Ok(sample_outcome()));

    let router = server(engine).build_router();
    let response = router.oneshot(extract_request(valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["customer_triggers"][0], "new baby");
    assert_eq!(body["personas"][0]["name"], "Busy Parent");
    assert_eq!(body["parallelCalls"], 5);
    assert_eq!(body["extractionTime"], 1200);
    assert_eq!(body["phase"], "all");
    assert_eq!(body["validation_score"], 86);
}

#[tokio::test]
async fn phase_is_forwarded_to_the_engine() {
    let mut engine = MockExtractionEngine::new();
    engine
        .expect_extract()
        .withf(|request| request.phase() == Phase::Two)
        .times(1)
        .returning(|_| {
            Ok(ExtractionOutcome {
                parallel_calls: 1,
                phase: Phase::Two,
                ..sample_outcome()
            })
        });

    let mut body = valid_body();
    body["phase"] = json!(2);
    let router = server(engine).build_router();
    let response = router.oneshot(extract_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["phase"], 2);
    assert_eq!(body["parallelCalls"], 1);
}

#[tokio::test]
async fn empty_content_is_rejected_before_the_engine_runs() {
    let mut engine = MockExtractionEngine::new();
    engine.expect_extract().times(0);

    let mut body = valid_body();
    body["websiteContent"] = json!("   ");
    let router = server(engine).build_router();
    let response = router.oneshot(extract_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("websiteContent"));
}

#[tokio::test]
async fn threshold_failure_maps_to_bad_gateway() {
    let mut engine = MockExtractionEngine::new();
    engine.expect_extract().times(1).returning(|_| {
        Err(ExtractorError::Orchestration {
            succeeded: 2,
            required: 4,
            dispatched: 5,
            failures: vec![
                WorkstreamFailure {
                    workstream: WorkstreamId::Personas,
                    error: "provider returned HTTP 503".to_string(),
                },
                WorkstreamFailure {
                    workstream: WorkstreamId::Hooks,
                    error: "no JSON object found".to_string(),
                },
            ],
        })
    });

    let router = server(engine).build_router();
    let response = router.oneshot(extract_request(valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    let failures = body["workstreamResults"].as_array().unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0]["workstream"], "personas");
}

#[tokio::test]
async fn config_failure_maps_to_internal_error() {
    let mut engine = MockExtractionEngine::new();
    engine.expect_extract().times(1).returning(|_| {
        Err(ExtractorError::Config {
            message: "no provider API keys configured".to_string(),
        })
    });

    let router = server(engine).build_router();
    let response = router.oneshot(extract_request(valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let router = server(MockExtractionEngine::new()).build_router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn status_endpoint_tracks_counters() {
    let mut engine = MockExtractionEngine::new();
    engine
        .expect_extract()
        .times(2)
        .returning(|_| Ok(sample_outcome()));
    let server = server(engine);
    let router = server.build_router();

    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(extract_request(valid_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["total_requests"], 2);
    assert_eq!(body["successful_extractions"], 2);
    assert_eq!(body["failed_extractions"], 0);
    assert_eq!(body["provider_key_count"], 2);
    assert_eq!(body["providers"][0], "openrouter");
}
