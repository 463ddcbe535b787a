// ABOUTME: Resting heart-rate reference table keyed by sex, age band, and fitness level
// ABOUTME: Immutable process-wide constant used by the metrics synthesizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Resting heart-rate ranges (BPM) by sex and age band
//!
//! Rows follow the usual resting heart-rate fitness charts. Levels are listed
//! fittest first: Athlete, Excellent, Good, Above Average, Average,
//! Below Average, Poor. The table is not meant to be medically exact.

use crate::models::{AgeBand, FitnessLevel, HeartRateRange, Sex};

type Row = [HeartRateRange; 7];

const fn row(ranges: [(u32, u32); 7]) -> Row {
    let mut out = [HeartRateRange::new(0, 0); 7];
    let mut i = 0;
    while i < 7 {
        out[i] = HeartRateRange::new(ranges[i].0, ranges[i].1);
        i += 1;
    }
    out
}

const MALE: [Row; 6] = [
    row([(49, 55), (56, 61), (62, 65), (66, 69), (70, 73), (74, 81), (82, 100)]),
    row([(49, 54), (55, 61), (62, 65), (66, 70), (71, 74), (75, 81), (82, 100)]),
    row([(50, 56), (57, 62), (63, 66), (67, 70), (71, 75), (76, 82), (83, 100)]),
    row([(50, 57), (58, 63), (64, 67), (68, 71), (72, 76), (77, 83), (84, 100)]),
    row([(51, 56), (57, 61), (62, 67), (68, 71), (72, 75), (76, 81), (82, 100)]),
    row([(50, 55), (56, 61), (62, 65), (66, 69), (70, 73), (74, 79), (80, 100)]),
];

const FEMALE: [Row; 6] = [
    row([(54, 60), (61, 65), (66, 69), (70, 73), (74, 78), (79, 84), (85, 100)]),
    row([(54, 59), (60, 64), (65, 68), (69, 72), (73, 76), (77, 82), (83, 100)]),
    row([(54, 59), (60, 64), (65, 69), (70, 73), (74, 78), (79, 84), (85, 100)]),
    row([(54, 60), (61, 65), (66, 69), (70, 73), (74, 77), (78, 83), (84, 100)]),
    row([(54, 59), (60, 64), (65, 68), (69, 73), (74, 77), (78, 83), (84, 100)]),
    // Below Average and Poor share 84 in the reference chart
    row([(54, 59), (60, 64), (65, 68), (69, 72), (73, 76), (77, 84), (84, 100)]),
];

/// Indexed by `Sex::index()`, `AgeBand::index()`, `FitnessLevel::index()`
static HEART_RATE_TABLE: [[Row; 6]; 2] = [MALE, FEMALE];

/// All seven ranges for one (sex, age band) row, fittest first
#[must_use]
pub fn ranges_for(sex: Sex, band: AgeBand) -> &'static [HeartRateRange; 7] {
    &HEART_RATE_TABLE[sex.index()][band.index()]
}

/// Inclusive range for one (sex, age band, fitness level) cell
#[must_use]
pub fn range_for(sex: Sex, band: AgeBand, level: FitnessLevel) -> HeartRateRange {
    ranges_for(sex, band)[level.index()]
}

/// Whole-row bounds: lowest `min` and highest `max` across all levels
#[must_use]
pub fn row_bounds(sex: Sex, band: AgeBand) -> HeartRateRange {
    let row = ranges_for(sex, band);
    let min = row.iter().map(|r| r.min).min().unwrap_or(0);
    let max = row.iter().map(|r| r.max).max().unwrap_or(0);
    HeartRateRange::new(min, max)
}
