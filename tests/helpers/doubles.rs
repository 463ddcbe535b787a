// ABOUTME: Test doubles for the LLM client, snapshot source, and event sink
// ABOUTME: Scripted, counting implementations that never touch the network

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use pulsecare_vitals::errors::{AppError, AppResult};
use pulsecare_vitals::llm::{ChatRequest, ChatResponse, LlmProvider};
use pulsecare_vitals::models::{
    BloodPressure, FitnessLevel, Sex, SubjectProfile, VitalsMetrics, VitalsReading,
    VitalsSnapshot,
};
use pulsecare_vitals::sse::{EventSink, SinkClosed};
use pulsecare_vitals::vitals::SnapshotSource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The reference subject
pub fn alice() -> SubjectProfile {
    SubjectProfile::new(
        "Alice",
        "Smith",
        Sex::Female,
        24,
        "alicesmith@pulsecare.com",
        "19242427",
    )
    .unwrap()
}

/// A fixed reading for Alice
pub fn sample_reading() -> VitalsReading {
    VitalsReading {
        timestamp: Utc::now(),
        subject: alice(),
        metrics: VitalsMetrics {
            heart_rate: 75,
            fitness_level: FitnessLevel::Average,
            blood_pressure: BloodPressure {
                systolic: 120,
                diastolic: 80,
            },
            steps_taken: 5000,
        },
    }
}

/// What a [`ScriptedLlm`] does on every call
#[derive(Clone)]
pub enum LlmScript {
    /// Answer with this content
    Reply(String),
    /// Fail with an upstream error carrying this status
    Fail(u16),
    /// Never answer
    Hang,
}

/// LLM double that follows a script and records every request
pub struct ScriptedLlm {
    script: LlmScript,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    pub fn new(script: LlmScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.script {
            LlmScript::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            LlmScript::Fail(status) => Err(AppError::external_service("OpenAI", "scripted failure")
                .with_details(serde_json::json!({ "status": status, "body": "nope" }))),
            LlmScript::Hang => std::future::pending().await,
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match &self.script {
            LlmScript::Reply(_) => Ok(true),
            LlmScript::Fail(status) => Err(AppError::external_service("OpenAI", "scripted failure")
                .with_details(serde_json::json!({ "status": status }))),
            LlmScript::Hang => std::future::pending().await,
        }
    }
}

/// Snapshot source that succeeds or fails on demand and counts calls
pub struct ScriptedSource {
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Succeeds only after sleeping for `delay`
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn assemble(&self) -> AppResult<VitalsSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(AppError::internal("scripted assembly failure"));
        }
        Ok(VitalsSnapshot::from_reading(
            sample_reading(),
            "stay hydrated".to_owned(),
        ))
    }
}

/// Event sink that keeps every frame it receives
#[derive(Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<Bytes>>>,
    fail_writes: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails
    pub fn broken() -> Self {
        Self {
            frames: Arc::default(),
            fail_writes: true,
        }
    }

    pub fn frames(&self) -> Vec<Bytes> {
        self.frames.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), SinkClosed> {
        if self.fail_writes {
            return Err(SinkClosed);
        }
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }

    async fn peer_closed(&self) {
        std::future::pending::<()>().await;
    }
}

/// Parse `id: <n>\ndata: <json>\n\n` into its parts
pub fn parse_data_frame(frame: &[u8]) -> (u64, serde_json::Value) {
    let text = std::str::from_utf8(frame).unwrap();
    let rest = text.strip_prefix("id: ").expect("frame must start with an id line");
    let (id, rest) = rest.split_once('\n').unwrap();
    let json = rest
        .strip_prefix("data: ")
        .and_then(|r| r.strip_suffix("\n\n"))
        .expect("frame must carry one data line");
    (id.parse().unwrap(), serde_json::from_str(json).unwrap())
}
