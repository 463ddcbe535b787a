// ABOUTME: Wire encoding of Server-Sent Events frames for the vitals stream
// ABOUTME: Snapshot frames carry a millisecond event id; failed ticks emit a keep-alive comment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Frame codec
//!
//! Frames are written byte-for-byte rather than through a generic event
//! builder so the layout stays fixed: `id: <n>\n` followed by a single
//! `data: <json>\n\n` line, or the `:keepalive\n\n` comment.

use bytes::Bytes;

use crate::constants::sse::KEEPALIVE_FRAME;
use crate::errors::AppResult;
use crate::models::VitalsSnapshot;

/// Encode one snapshot as an `id` + `data` frame
///
/// Serialized JSON never contains a raw newline, so the payload always fits on
/// one `data:` line.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized
pub fn snapshot_frame(id: u64, snapshot: &VitalsSnapshot) -> AppResult<Bytes> {
    let json = serde_json::to_string(snapshot)?;
    Ok(Bytes::from(format!("id: {id}\ndata: {json}\n\n")))
}

/// The keep-alive comment frame
#[must_use]
pub const fn keepalive_frame() -> Bytes {
    Bytes::from_static(KEEPALIVE_FRAME.as_bytes())
}

/// Next event id: the emission time in Unix milliseconds, bumped past `last`
/// when the clock has not moved forward
#[must_use]
pub fn next_event_id(now_ms: u64, last: Option<u64>) -> u64 {
    match last {
        Some(prev) if now_ms <= prev => prev + 1,
        _ => now_ms,
    }
}

/// Current wall-clock time in Unix milliseconds
#[must_use]
pub fn unix_millis_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
