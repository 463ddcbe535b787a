// ABOUTME: Per-connection stream session: lifecycle state machine and periodic dispatch loop
// ABOUTME: Emits one snapshot immediately, then one per tick, until the peer or server closes it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stream Sessions
//!
//! Each open stream runs as one tokio task. Its lifecycle is
//! `Opening -> Active -> Closing -> Closed`, published through a
//! [`tokio::sync::watch`] channel that doubles as the close signal.
//!
//! Guarantees:
//! - the first snapshot is emitted without waiting for the interval;
//! - the timer skips missed ticks instead of bursting to catch up;
//! - nothing is written once the session is `Closing` or `Closed`;
//! - an assembly still in flight when a close arrives is abandoned;
//! - `Closed` is reached exactly once, after the timer and sink are released.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::frame::{keepalive_frame, next_event_id, snapshot_frame, unix_millis_now};
use super::manager::SessionManager;
use crate::vitals::SnapshotSource;

/// Lifecycle of a stream session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Headers sent, first snapshot not yet written
    Opening,
    /// Emitting on every tick
    Active,
    /// Teardown requested; no further writes
    Closing,
    /// Timer cancelled and sink released
    Closed,
}

impl SessionState {
    /// Whether the session is shutting down or gone
    #[must_use]
    pub const fn is_terminating(&self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Closed through a handle or by server shutdown
    Requested,
    /// The client went away
    PeerClosed,
    /// Writing a frame failed
    WriteFailed,
}

/// The receiving side of an event sink is gone
#[derive(Debug, Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Destination for encoded frames
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Write one frame
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), SinkClosed>;

    /// Resolves once the consumer has gone away
    async fn peer_closed(&self);
}

#[async_trait]
impl EventSink for mpsc::Sender<Result<Bytes, Infallible>> {
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), SinkClosed> {
        mpsc::Sender::send(self, Ok(frame))
            .await
            .map_err(|_| SinkClosed)
    }

    async fn peer_closed(&self) {
        mpsc::Sender::closed(self).await;
    }
}

/// Move a live session to `Closing`; returns false if it was already terminating
pub(crate) fn request_close(state: &watch::Sender<SessionState>) -> bool {
    state.send_if_modified(|current| {
        if current.is_terminating() {
            false
        } else {
            *current = SessionState::Closing;
            true
        }
    })
}

/// Control handle for a running session
///
/// Dropping the handle does not close the session.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    state: Arc<watch::Sender<SessionState>>,
    task: JoinHandle<CloseReason>,
}

impl SessionHandle {
    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Ask the session to stop; repeated calls are no-ops
    pub fn close(&self) -> bool {
        request_close(&self.state)
    }

    /// Wait for the session task to finish
    ///
    /// Returns `None` if the task panicked or was aborted.
    pub async fn join(self) -> Option<CloseReason> {
        self.task.await.ok()
    }

    /// Close the session and wait for teardown to complete
    pub async fn shutdown(self) -> Option<CloseReason> {
        self.close();
        self.join().await
    }
}

/// Everything one session task owns
pub(crate) struct SessionTask<K> {
    pub(crate) id: Uuid,
    pub(crate) source: Arc<dyn SnapshotSource>,
    pub(crate) sink: K,
    pub(crate) interval: Duration,
    pub(crate) state: Arc<watch::Sender<SessionState>>,
    pub(crate) manager: SessionManager,
}

impl<K: EventSink + 'static> SessionTask<K> {
    /// Spawn the dispatch loop
    pub(crate) fn spawn(self) -> SessionHandle {
        let id = self.id;
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(self.run());
        SessionHandle { id, state, task }
    }

    async fn run(self) -> CloseReason {
        let Self {
            id,
            source,
            mut sink,
            interval,
            state,
            manager,
        } = self;

        let mut close_rx = state.subscribe();
        // interval() panics on a zero period
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_id: Option<u64> = None;

        info!(session_id = %id, interval_secs = interval.as_secs(), "Stream session opened");

        let reason = loop {
            tokio::select! {
                biased;
                () = close_requested(&mut close_rx) => break CloseReason::Requested,
                () = sink.peer_closed() => break CloseReason::PeerClosed,
                _ = ticker.tick() => {}
            }

            let frame = tokio::select! {
                biased;
                () = close_requested(&mut close_rx) => break CloseReason::Requested,
                () = sink.peer_closed() => break CloseReason::PeerClosed,
                result = source.assemble() => match result {
                    Ok(snapshot) => {
                        let event_id = next_event_id(unix_millis_now(), last_id);
                        match snapshot_frame(event_id, &snapshot) {
                            Ok(frame) => {
                                last_id = Some(event_id);
                                frame
                            }
                            Err(e) => {
                                warn!(session_id = %id, error = %e, "Failed to encode snapshot, sending keep-alive");
                                keepalive_frame()
                            }
                        }
                    }
                    Err(e) => {
                        warn!(session_id = %id, error = %e, "Snapshot assembly failed, sending keep-alive");
                        keepalive_frame()
                    }
                },
            };

            if state.borrow().is_terminating() {
                break CloseReason::Requested;
            }

            let sent = tokio::select! {
                biased;
                () = close_requested(&mut close_rx) => break CloseReason::Requested,
                sent = sink.send_frame(frame) => sent,
            };
            if sent.is_err() {
                break CloseReason::WriteFailed;
            }

            state.send_if_modified(|current| {
                if *current == SessionState::Opening {
                    *current = SessionState::Active;
                    true
                } else {
                    false
                }
            });
            manager.record_emission(id).await;
            debug!(session_id = %id, "Frame emitted");
        };

        request_close(&state);
        drop(ticker);
        drop(sink);
        state.send_replace(SessionState::Closed);
        manager.unregister(id).await;

        info!(session_id = %id, reason = ?reason, "Stream session closed");
        reason
    }
}

/// Resolves once the session has been asked to close
async fn close_requested(rx: &mut watch::Receiver<SessionState>) {
    // A dropped sender also ends the wait
    drop(rx.wait_for(SessionState::is_terminating).await);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_close_is_idempotent() {
        let (state, _rx) = watch::channel(SessionState::Active);
        assert!(request_close(&state));
        assert!(!request_close(&state));
        assert_eq!(*state.borrow(), SessionState::Closing);
    }

    #[test]
    fn test_closed_session_stays_closed() {
        let (state, _rx) = watch::channel(SessionState::Closed);
        assert!(!request_close(&state));
        assert_eq!(*state.borrow(), SessionState::Closed);
    }

    #[test]
    fn test_terminating_states() {
        assert!(!SessionState::Opening.is_terminating());
        assert!(!SessionState::Active.is_terminating());
        assert!(SessionState::Closing.is_terminating());
        assert!(SessionState::Closed.is_terminating());
    }
}
