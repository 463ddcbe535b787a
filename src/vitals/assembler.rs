// ABOUTME: Snapshot assembler composing subject, synthesized metrics, timestamp, and advisory
// ABOUTME: Exposes the SnapshotSource seam used by the stream sessions and the one-shot route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{MetricsSynthesizer, SubjectPool};
use crate::errors::AppResult;
use crate::models::{VitalsReading, VitalsSnapshot};
use crate::recommendations::RecommendationProvider;

/// Anything that can produce a fresh [`VitalsSnapshot`] on demand
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Produce one snapshot
    async fn assemble(&self) -> AppResult<VitalsSnapshot>;
}

/// Production snapshot pipeline
#[derive(Debug, Clone)]
pub struct SnapshotAssembler {
    pool: SubjectPool,
    synthesizer: MetricsSynthesizer,
    recommendations: Arc<RecommendationProvider>,
}

impl SnapshotAssembler {
    /// Create an assembler over `pool`
    #[must_use]
    pub const fn new(pool: SubjectPool, recommendations: Arc<RecommendationProvider>) -> Self {
        Self {
            pool,
            synthesizer: MetricsSynthesizer::new(),
            recommendations,
        }
    }

    /// Draw one reading without contacting the recommendation service
    #[must_use]
    pub fn draw_reading(&self) -> VitalsReading {
        let mut rng = rand::thread_rng();
        let subject = self.pool.choose(&mut rng).clone();
        let metrics = self.synthesizer.synthesize(&subject, &mut rng);
        VitalsReading {
            timestamp: Utc::now(),
            subject,
            metrics,
        }
    }
}

#[async_trait]
impl SnapshotSource for SnapshotAssembler {
    async fn assemble(&self) -> AppResult<VitalsSnapshot> {
        let reading = self.draw_reading();
        let notes = self.recommendations.recommend(&reading).await;

        debug!(
            subject = %reading.subject.full_name(),
            heart_rate = reading.metrics.heart_rate,
            "Assembled vitals snapshot"
        );

        Ok(VitalsSnapshot::from_reading(reading, notes))
    }
}
