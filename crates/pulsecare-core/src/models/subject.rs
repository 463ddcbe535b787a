// ABOUTME: Reference subject profile model used to key synthetic vitals generation
// ABOUTME: Immutable record of identity fields plus the sex used for heart-rate lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used to select a heart-rate table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male reference ranges
    Male,
    /// Female reference ranges
    Female,
}

impl Sex {
    /// Every variant, in table order
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Row index into per-sex lookup tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }

    /// Display name as it appears on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference subject whose vitals are synthesized
///
/// Profiles are created once at startup and never mutated. The `identifier`
/// travels under the `ssn` key to stay compatible with existing dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProfile {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Sex used for heart-rate lookup
    pub sex: Sex,
    /// Age in whole years
    pub age: u32,
    /// Contact email
    pub email: String,
    /// Subject identifier
    #[serde(rename = "ssn")]
    pub identifier: String,
}

impl SubjectProfile {
    /// Build a profile, rejecting a zero age
    ///
    /// # Errors
    ///
    /// Returns an error if `age` is zero
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        sex: Sex,
        age: u32,
        email: impl Into<String>,
        identifier: impl Into<String>,
    ) -> AppResult<Self> {
        if age == 0 {
            return Err(AppError::invalid_input("Subject age must be positive"));
        }

        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            sex,
            age,
            email: email.into(),
            identifier: identifier.into(),
        })
    }

    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
