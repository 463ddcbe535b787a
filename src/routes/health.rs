// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports liveness, readiness, open streams, recommendation mode and upstream reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> axum::Router {
        use axum::{extract::State, routing::get, Json, Router};

        async fn health_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            let recommendations = if resources.recommendations.is_llm_backed() {
                "llm"
            } else {
                "fallback"
            };
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "active_streams": resources.sessions.active_sessions().await,
                "recommendations": recommendations
            }))
        }

        // Upstream trouble does not make us unready: the fallback advisory still serves
        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            let upstream = resources.recommendations.upstream_status().await;
            Json(serde_json::json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "recommendations_upstream": upstream.as_str()
            }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
