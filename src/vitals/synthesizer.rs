// ABOUTME: Metrics synthesizer producing randomized physiological readings for a subject
// ABOUTME: Pure and stateless; draws from the heart-rate table and fixed vitals ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Synthetic vitals generation
//!
//! Generation is generic over [`rand::Rng`] so tests can drive it with a
//! seeded generator while production uses the thread-local one.

use super::heart_rate;
use crate::constants::vitals::{DIASTOLIC_RANGE, STEPS_RANGE, SYSTOLIC_RANGE};
use crate::models::{AgeBand, BloodPressure, FitnessLevel, SubjectProfile, VitalsMetrics};
use rand::seq::SliceRandom;
use rand::Rng;

/// Stateless generator of [`VitalsMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSynthesizer;

impl MetricsSynthesizer {
    /// Create a synthesizer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Synthesize one set of metrics for `profile`
    ///
    /// The fitness level is picked uniformly among the seven levels of the
    /// subject's (sex, age band) row, then the heart rate is drawn uniformly
    /// from that level's inclusive range.
    pub fn synthesize<R: Rng + ?Sized>(&self, profile: &SubjectProfile, rng: &mut R) -> VitalsMetrics {
        let band = AgeBand::from_age(profile.age);
        let fitness_level = FitnessLevel::ALL
            .choose(rng)
            .copied()
            .unwrap_or(FitnessLevel::Average);
        let range = heart_rate::range_for(profile.sex, band, fitness_level);

        VitalsMetrics {
            heart_rate: rng.gen_range(range.min..=range.max),
            fitness_level,
            blood_pressure: BloodPressure {
                systolic: rng.gen_range(SYSTOLIC_RANGE),
                diastolic: rng.gen_range(DIASTOLIC_RANGE),
            },
            steps_taken: rng.gen_range(STEPS_RANGE),
        }
    }
}
