//! Integration tests for chat HTTP endpoints.
//!
//! These tests drive the full router (routes, handlers, application layer,
//! in-memory store) with scripted completion and search providers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use symptom_compass::adapters::ai::{MockAIProvider, MockError};
use symptom_compass::adapters::clock::ManualClock;
use symptom_compass::adapters::http::{app_router, ChatAppState};
use symptom_compass::adapters::search::MockSearchProvider;
use symptom_compass::adapters::storage::InMemorySessionStore;
use symptom_compass::application::handlers::chat::{
    AnalyzerSettings, ConversationOrchestrator, SearchSettings, SourceSearchService,
    SymptomAnalyzer,
};
use symptom_compass::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(ai: MockAIProvider, search: MockSearchProvider) -> Router {
    let orchestrator = ConversationOrchestrator::new(
        SourceSearchService::new(
            Some(Arc::new(search)),
            Arc::new(ManualClock::starting_at(0)),
            SearchSettings::default(),
        ),
        SymptomAnalyzer::new(Some(Arc::new(ai)), AnalyzerSettings::default()),
    );
    let state = ChatAppState::new(Arc::new(InMemorySessionStore::new()), Arc::new(orchestrator));
    app_router(state, &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/chat/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn new_session_starts_empty() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());
    let id = create_session(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/chat/sessions/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], id.as_str());
    assert_eq!(body["turns"], json!([]));
}

#[tokio::test]
async fn small_talk_gets_canned_reply_without_external_calls() {
    let ai = MockAIProvider::new();
    let search = MockSearchProvider::new();
    let app = app(ai.clone(), search.clone());
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/chat/sessions/{}/messages", id),
        Some(json!({ "message": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "small_talk");
    assert_eq!(body["turnCount"], 2);
    assert!(body.get("result").is_none());
    assert_eq!(ai.call_count(), 0);
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn emergency_message_is_analyzed_and_recorded() {
    let ai = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 25 });
    let search = MockSearchProvider::new().with_urls(&[(
        "https://www.heart.org/chest-pain",
        "Chest pain",
    )]);
    let app = app(ai, search);
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/chat/sessions/{}/messages", id),
        Some(json!({ "message": "I have crushing chest pain" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "analysis");
    assert_eq!(body["result"]["analysis"]["urgencyTier"], "emergency");
    assert!(body["formattedText"]
        .as_str()
        .unwrap()
        .starts_with("**EMERGENCY:**"));
    assert!(!body["result"]["analysis"]["disclaimer"]
        .as_str()
        .unwrap()
        .is_empty());

    let (_, session) = send(&app, Method::GET, &format!("/chat/sessions/{}", id), None).await;
    let turns = session["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[0]["content"], "I have crushing chest pain");
    assert_eq!(turns[1]["role"], "assistant");
    assert_eq!(turns[1]["urgency"], "emergency");
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/chat/sessions/{}/messages", id),
        Some(json!({ "message": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (_, session) = send(&app, Method::GET, &format!("/chat/sessions/{}", id), None).await;
    assert_eq!(session["turns"], json!([]));
}

#[tokio::test]
async fn missing_message_field_is_rejected() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/chat/sessions/{}/messages", id),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());

    let (status, body) = send(&app, Method::GET, "/chat/sessions/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());
    let unknown = "00000000-0000-4000-8000-000000000000";

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/chat/sessions/{}/messages", unknown),
        Some(json!({ "message": "I have a cough" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn ended_session_is_gone() {
    let app = app(MockAIProvider::new(), MockSearchProvider::new());
    let id = create_session(&app).await;
    let uri = format!("/chat/sessions/{}", id);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
