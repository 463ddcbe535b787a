// ABOUTME: Wire-level tests for the OpenAI-compatible provider against a local stub server
// ABOUTME: Verifies request shape, auth header, response parsing, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use pulsecare_vitals::errors::ErrorCode;
use pulsecare_vitals::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Start a stub that answers chat completions with `status` and `reply`
async fn start_stub(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();
    let state = (captured.clone(), status, reply);

    async fn completions(
        State((captured, status, reply)): State<(Captured, StatusCode, Value)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        *captured.body.lock().unwrap() = Some(body);
        *captured.auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        (status, Json(reply))
    }

    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .route("/v1/models", get(|| async { Json(json!({"data": []})) }))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), captured)
}

fn provider_for(base_url: String) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url,
        api_key: Some("sk-test".to_owned()),
        default_model: "gpt-4o".to_owned(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a healthcare assistant."),
        ChatMessage::user("Advise me."),
    ])
    .with_max_tokens(150)
}

#[tokio::test]
async fn test_complete_sends_openai_request_and_parses_reply() {
    let reply = json!({
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "message": {"role": "assistant", "content": "- Walk more"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 40, "completion_tokens": 5, "total_tokens": 45}
    });
    let (base_url, captured) = start_stub(StatusCode::OK, reply).await;

    let response = provider_for(base_url).complete(&request()).await.unwrap();

    assert_eq!(response.content, "- Walk more");
    assert_eq!(response.model, "gpt-4o-2024-08-06");
    assert_eq!(response.usage.unwrap().total_tokens, 45);

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["max_tokens"], 150);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Advise me.");
    assert_eq!(
        captured.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-test")
    );
}

#[tokio::test]
async fn test_auth_failure_is_mapped_with_details() {
    let reply = json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}});
    let (base_url, _) = start_stub(StatusCode::UNAUTHORIZED, reply).await;

    let err = provider_for(base_url).complete(&request()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert_eq!(err.details["status"], 401);
    assert!(err.details["body"].as_str().unwrap().contains("Incorrect API key"));
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let (base_url, _) = start_stub(StatusCode::OK, json!({"model": "gpt-4o", "choices": []})).await;

    let err = provider_for(base_url).complete(&request()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider_for(format!("http://{addr}/v1"))
        .complete(&request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_health_check_hits_models_endpoint() {
    let (base_url, _) = start_stub(StatusCode::OK, json!({})).await;
    assert!(provider_for(base_url).health_check().await.unwrap());
}
