// ABOUTME: Core types for the PulseCare vitals feed
// ABOUTME: Foundation crate with error handling and the vitals data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PulseCare Core
//!
//! Foundation crate providing shared types for the PulseCare vitals feed. This
//! crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Subject profiles, fitness classification, and vitals snapshots

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Vitals data model (subjects, age bands, fitness levels, snapshots)
pub mod models;
