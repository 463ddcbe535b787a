// ABOUTME: Server binary for the PulseCare vitals feed
// ABOUTME: Parses CLI overrides, loads environment configuration, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # PulseCare Vitals Server Binary

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pulsecare_vitals::config::{ConfigOverrides, ServerConfig};
use pulsecare_vitals::{logging, resources::ServerResources, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "pulsecare-server")]
#[command(about = "PulseCare vitals feed - synthetic health snapshots over REST and SSE")]
pub struct Args {
    /// Override HTTP port (`PORT`)
    #[arg(long)]
    port: Option<u16>,

    /// Override bind address (`HOST`)
    #[arg(long)]
    host: Option<String>,

    /// Override seconds between stream emissions (`VITALS_STREAM_INTERVAL_SECS`)
    #[arg(long)]
    stream_interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::load(ConfigOverrides {
        http_port: args.port,
        host: args.host,
        emission_interval_secs: args.stream_interval_secs,
    })
    .context("Failed to load configuration")?;

    info!("{}", config.summary());

    let resources =
        Arc::new(ServerResources::from_config(config).context("Failed to initialize server")?);
    server::serve(resources).await.context("Server failed")?;

    Ok(())
}
