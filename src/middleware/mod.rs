// ABOUTME: HTTP middleware for the vitals server
// ABOUTME: Cross-origin policy applied to every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
