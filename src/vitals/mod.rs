// ABOUTME: Vitals generation pipeline from reference tables to assembled snapshots
// ABOUTME: Heart-rate table, metrics synthesizer, subject pool, and snapshot assembler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Vitals Pipeline
//!
//! Pure generation ([`heart_rate`], [`MetricsSynthesizer`]) is kept apart from
//! the async assembly step ([`SnapshotAssembler`]) that also fetches the
//! recommendation text.

pub mod assembler;
pub mod heart_rate;
pub mod subjects;
pub mod synthesizer;

pub use assembler::{SnapshotAssembler, SnapshotSource};
pub use subjects::SubjectPool;
pub use synthesizer::MetricsSynthesizer;
