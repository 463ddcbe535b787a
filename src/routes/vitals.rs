// ABOUTME: Vitals route handlers for the one-shot snapshot and the live event stream
// ABOUTME: /api/vitals returns one JSON snapshot; /api/vitals-stream opens an SSE session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Vitals routes
//!
//! The stream handler only negotiates the response; the session task spawned
//! through [`crate::sse::SessionManager`] owns everything after the headers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::constants::sse;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Vitals routes implementation
pub struct VitalsRoutes;

impl VitalsRoutes {
    /// Create all vitals routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/vitals", get(Self::handle_vitals))
            .route("/api/vitals-stream", get(Self::handle_vitals_stream))
            .with_state(resources)
    }

    /// Assemble and return one snapshot
    async fn handle_vitals(State(resources): State<Arc<ServerResources>>) -> Response {
        match resources.snapshots.assemble().await {
            Ok(snapshot) => Json(snapshot).into_response(),
            Err(e) => AppError::internal("Failed to generate vitals")
                .with_source(e)
                .into_response(),
        }
    }

    /// Open a Server-Sent Events session
    async fn handle_vitals_stream(State(resources): State<Arc<ServerResources>>) -> Response {
        let (tx, rx) = mpsc::channel::<Result<Bytes, Infallible>>(sse::CHANNEL_CAPACITY);

        let handle = resources
            .sessions
            .open(
                Arc::clone(&resources.snapshots),
                tx,
                resources.config.stream.emission_interval(),
            )
            .await;
        info!(session_id = %handle.id(), "Vitals stream connected");

        (
            [
                (header::CONTENT_TYPE, sse::CONTENT_TYPE),
                (header::CACHE_CONTROL, sse::CACHE_CONTROL),
                (header::CONNECTION, sse::CONNECTION),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            ],
            Body::from_stream(ReceiverStream::new(rx)),
        )
            .into_response()
    }
}
