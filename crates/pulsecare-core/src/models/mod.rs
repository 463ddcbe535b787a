// ABOUTME: Vitals data model shared by the synthesizer, assembler, and HTTP layer
// ABOUTME: Re-exports subject profile and vitals snapshot types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Reference subject profiles
pub mod subject;
/// Physiological classification and vitals snapshots
pub mod vitals;

pub use subject::{Sex, SubjectProfile};
pub use vitals::{
    AgeBand, BloodPressure, FitnessLevel, HeartRateRange, VitalsMetrics, VitalsReading,
    VitalsSnapshot,
};
