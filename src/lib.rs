// ABOUTME: Main library entry point for the PulseCare vitals feed
// ABOUTME: Synthetic health snapshots with LLM recommendations over REST and Server-Sent Events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PulseCare Vitals
//!
//! A small HTTP service that publishes synthetic physiological snapshots for a
//! pool of reference subjects, each annotated with health recommendations from
//! an `OpenAI`-compatible model (or a fixed advisory when none is configured).
//!
//! ## Endpoints
//!
//! - `GET /api/vitals`: one snapshot as JSON
//! - `GET /api/vitals-stream`: a Server-Sent Events stream with one snapshot
//!   immediately and one per configured interval
//! - `GET /health`, `GET /ready`: monitoring
//!
//! ## Architecture
//!
//! - **Vitals**: heart-rate reference table, metrics synthesizer, subject pool,
//!   snapshot assembler
//! - **Recommendations**: LLM-backed advisory with explicit fallback
//! - **SSE**: frame codec, per-connection session state machine, registry
//! - **Routes / Server**: axum handlers, CORS, tracing, graceful shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pulsecare_vitals::config::ServerConfig;
//! use pulsecare_vitals::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// LLM provider abstraction and prompt templates
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Health recommendation provider
pub mod recommendations;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Server bootstrap and shutdown
pub mod server;

/// Server-Sent Events delivery
pub mod sse;

/// Vitals generation pipeline
pub mod vitals;

// Re-export core types
pub use pulsecare_core::{errors, models};
