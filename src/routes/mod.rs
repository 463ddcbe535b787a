// ABOUTME: Route module organization for the PulseCare vitals HTTP endpoints
// ABOUTME: Groups route definitions by domain with thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the vitals pipeline and session registry.

/// Health check and system status routes
pub mod health;
/// Vitals snapshot and stream routes
pub mod vitals;

/// Health check route handlers
pub use health::HealthRoutes;
/// Vitals route handlers
pub use vitals::VitalsRoutes;
