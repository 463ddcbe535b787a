// ABOUTME: Server-Sent Events delivery of periodic vitals snapshots
// ABOUTME: Frame codec, per-connection session state machine, and session registry
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Byte-exact frame encoding
pub mod frame;
/// Registry of open sessions
pub mod manager;
/// Per-connection lifecycle and dispatch loop
pub mod session;

pub use manager::{SessionManager, SessionMetadata};
pub use session::{CloseReason, EventSink, SessionHandle, SessionState, SinkClosed};
