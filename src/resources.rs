// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds configuration, the snapshot source, recommendations, and the session registry
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Server Resources Module
//!
//! Built once at startup and handed to the router as `Arc<ServerResources>`.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::recommendations::RecommendationProvider;
use crate::sse::SessionManager;
use crate::vitals::{SnapshotAssembler, SnapshotSource, SubjectPool};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Producer of vitals snapshots
    pub snapshots: Arc<dyn SnapshotSource>,
    /// Open stream sessions
    pub sessions: SessionManager,
    /// Recommendation provider shared with the snapshot pipeline
    pub recommendations: Arc<RecommendationProvider>,
}

impl ServerResources {
    /// Wire the production pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the subject pool or the HTTP client cannot be built
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let recommendations = Arc::new(RecommendationProvider::from_config(&config.recommendations)?);
        let assembler =
            SnapshotAssembler::new(SubjectPool::reference()?, Arc::clone(&recommendations));

        Ok(Self::new(config, Arc::new(assembler), recommendations))
    }

    /// Resources over an arbitrary snapshot source
    #[must_use]
    pub fn new(
        config: ServerConfig,
        snapshots: Arc<dyn SnapshotSource>,
        recommendations: Arc<RecommendationProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            snapshots,
            sessions: SessionManager::new(),
            recommendations,
        }
    }
}
