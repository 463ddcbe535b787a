// ABOUTME: Registry of open stream sessions with per-session monitoring metadata
// ABOUTME: Opens sessions, records emissions, and closes every session on shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::session::{request_close, EventSink, SessionHandle, SessionState, SessionTask};
use crate::vitals::SnapshotSource;
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

/// Stream session metadata
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    /// When the session was opened
    pub created_at: DateTime<Utc>,
    /// Frames written, keep-alives included
    pub events_sent: u64,
    /// Time of the most recent write
    pub last_emission: Option<DateTime<Utc>>,
}

struct SessionEntry {
    metadata: SessionMetadata,
    state: Arc<watch::Sender<SessionState>>,
}

/// Registry of live stream sessions
///
/// Sessions run independently; the registry is only touched when a session
/// opens, emits, or closes.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionManager {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and start a new session writing to `sink`
    pub async fn open<K: EventSink + 'static>(
        &self,
        source: Arc<dyn SnapshotSource>,
        sink: K,
        interval: Duration,
    ) -> SessionHandle {
        let id = Uuid::new_v4();
        let (state, _) = watch::channel(SessionState::Opening);
        let state = Arc::new(state);

        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(
                id,
                SessionEntry {
                    metadata: SessionMetadata {
                        created_at: Utc::now(),
                        events_sent: 0,
                        last_emission: None,
                    },
                    state: Arc::clone(&state),
                },
            );
        }

        SessionTask {
            id,
            source,
            sink,
            interval,
            state,
            manager: self.clone(),
        }
        .spawn()
    }

    pub(crate) async fn record_emission(&self, id: Uuid) {
        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get_mut(&id) {
            entry.metadata.events_sent += 1;
            entry.metadata.last_emission = Some(Utc::now());
        }
    }

    pub(crate) async fn unregister(&self, id: Uuid) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id);
    }

    /// Get count of open sessions
    pub async fn active_sessions(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Metadata for one session
    pub async fn metadata(&self, id: Uuid) -> Option<SessionMetadata> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(|entry| entry.metadata.clone())
    }

    /// Ask every open session to close; returns how many were signalled
    pub async fn close_all(&self) -> usize {
        let sessions = self.sessions.read().await;
        let closed = sessions
            .values()
            .filter(|entry| request_close(&entry.state))
            .count();
        tracing::info!("Requested close of {} stream sessions", closed);
        closed
    }

    /// Wait until every session has unregistered, polling every `poll`
    pub async fn wait_idle(&self, poll: Duration) {
        while self.active_sessions().await > 0 {
            tokio::time::sleep(poll).await;
        }
    }
}
