// ABOUTME: Physiological classification types and the vitals snapshot wire format
// ABOUTME: Age bands, fitness levels, blood pressure, and the snapshot emitted to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::subject::SubjectProfile;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Age bucket keying the heart-rate lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    /// Up to and including 25
    Age18To25,
    /// 26 through 35
    Age26To35,
    /// 36 through 45
    Age36To45,
    /// 46 through 55
    Age46To55,
    /// 56 through 65
    Age56To65,
    /// Older than 65
    Age65Plus,
}

impl AgeBand {
    /// Every band, youngest first
    pub const ALL: [Self; 6] = [
        Self::Age18To25,
        Self::Age26To35,
        Self::Age36To45,
        Self::Age46To55,
        Self::Age56To65,
        Self::Age65Plus,
    ];

    /// Resolve the band for an age; upper bounds are inclusive
    #[must_use]
    pub const fn from_age(age: u32) -> Self {
        match age {
            0..=25 => Self::Age18To25,
            26..=35 => Self::Age26To35,
            36..=45 => Self::Age36To45,
            46..=55 => Self::Age46To55,
            56..=65 => Self::Age56To65,
            _ => Self::Age65Plus,
        }
    }

    /// Column index into per-band lookup tables
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label as used in reference charts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age18To25 => "18-25",
            Self::Age26To35 => "26-35",
            Self::Age36To45 => "36-45",
            Self::Age46To55 => "46-55",
            Self::Age56To65 => "56-65",
            Self::Age65Plus => "65+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AgeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Resting heart-rate fitness classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessLevel {
    /// Lowest resting rates
    Athlete,
    /// Excellent
    Excellent,
    /// Good
    Good,
    /// Above average
    #[serde(rename = "Above Average")]
    AboveAverage,
    /// Average
    Average,
    /// Below average
    #[serde(rename = "Below Average")]
    BelowAverage,
    /// Highest resting rates
    Poor,
}

impl FitnessLevel {
    /// Every level, fittest first
    pub const ALL: [Self; 7] = [
        Self::Athlete,
        Self::Excellent,
        Self::Good,
        Self::AboveAverage,
        Self::Average,
        Self::BelowAverage,
        Self::Poor,
    ];

    /// Index into per-level lookup tables
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name as it appears on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Athlete => "Athlete",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::AboveAverage => "Above Average",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive heart-rate range in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeartRateRange {
    /// Lower bound (inclusive)
    pub min: u32,
    /// Upper bound (inclusive)
    pub max: u32,
}

impl HeartRateRange {
    /// Create a range; callers guarantee `min <= max`
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `bpm` falls inside the range
    #[must_use]
    pub const fn contains(&self, bpm: u32) -> bool {
        bpm >= self.min && bpm <= self.max
    }
}

/// Blood pressure reading, rendered as `"systolic/diastolic"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    /// Systolic pressure in mmHg
    pub systolic: u32,
    /// Diastolic pressure in mmHg
    pub diastolic: u32,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

impl FromStr for BloodPressure {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::invalid_input(format!("Invalid blood pressure: {s:?}"));
        let (systolic, diastolic) = s.split_once('/').ok_or_else(invalid)?;

        Ok(Self {
            systolic: systolic.trim().parse().map_err(|_| invalid())?,
            diastolic: diastolic.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for BloodPressure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BloodPressure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Randomized metrics produced by the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsMetrics {
    /// Resting heart rate in BPM
    pub heart_rate: u32,
    /// Fitness level the heart rate was drawn from
    pub fitness_level: FitnessLevel,
    /// Blood pressure reading
    pub blood_pressure: BloodPressure,
    /// Steps taken today
    pub steps_taken: u32,
}

/// A timestamped reading for one subject, before recommendations are attached
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsReading {
    /// Instant the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Subject the reading belongs to
    pub subject: SubjectProfile,
    /// Synthesized metrics
    pub metrics: VitalsMetrics,
}

/// One complete, timestamped vitals record ready for transmission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsSnapshot {
    /// ISO-8601 instant, millisecond precision
    #[serde(with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,
    /// Subject identity fields
    #[serde(flatten)]
    pub subject: SubjectProfile,
    /// Resting heart rate in BPM
    pub heart_rate: u32,
    /// Fitness classification
    pub fitness_level: FitnessLevel,
    /// Blood pressure, `"systolic/diastolic"`
    pub blood_pressure: BloodPressure,
    /// Steps taken today
    pub steps_taken: u32,
    /// Natural-language recommendations
    pub notes: String,
}

impl VitalsSnapshot {
    /// Compose the final snapshot from a reading and its recommendations
    #[must_use]
    pub fn from_reading(reading: VitalsReading, notes: String) -> Self {
        let VitalsReading {
            timestamp,
            subject,
            metrics,
        } = reading;

        Self {
            timestamp,
            subject,
            heart_rate: metrics.heart_rate,
            fitness_level: metrics.fitness_level,
            blood_pressure: metrics.blood_pressure,
            steps_taken: metrics.steps_taken,
            notes,
        }
    }
}

/// `2025-03-01T12:00:00.000Z` style timestamps
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
