// ABOUTME: Fixed pool of reference subjects whose vitals are synthesized
// ABOUTME: Built once at startup, shared read-only, sampled uniformly per snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{Sex, SubjectProfile};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Non-empty, immutable pool of subject profiles
#[derive(Debug, Clone)]
pub struct SubjectPool {
    subjects: Arc<[SubjectProfile]>,
}

impl SubjectPool {
    /// Create a pool from the given profiles
    ///
    /// # Errors
    ///
    /// Returns an error if `subjects` is empty
    pub fn new(subjects: Vec<SubjectProfile>) -> AppResult<Self> {
        if subjects.is_empty() {
            return Err(AppError::config("Subject pool must contain at least one profile"));
        }
        Ok(Self {
            subjects: subjects.into(),
        })
    }

    /// The built-in reference pool
    ///
    /// # Errors
    ///
    /// Returns an error only if a built-in profile is invalid
    pub fn reference() -> AppResult<Self> {
        Self::new(vec![SubjectProfile::new(
            "Alice",
            "Smith",
            Sex::Female,
            24,
            "alicesmith@pulsecare.com",
            "19242427",
        )?])
    }

    /// Pick one subject uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &SubjectProfile {
        // Never empty, enforced by the constructor
        self.subjects.choose(rng).unwrap_or(&self.subjects[0])
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
