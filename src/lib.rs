pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod formatter;
pub mod models;
pub mod protocol;
pub mod query;

use crate::client::SystemBus;
use crate::config::AppConfig;
use crate::query::QuerySummary;
use anyhow::Context;
use log::{debug, info};
use std::io;

/// Connect to the system bus and print every configured sensor matching
/// `sensor_type`. Only a failed connection is an error; sensors that cannot
/// be read are reported in the output and counted in the summary.
pub fn run(config: &AppConfig, sensor_type: Option<&str>) -> anyhow::Result<QuerySummary> {
    info!("Starting sensor query");
    debug!("{} sensors configured", config.sensors.len());

    let bus = SystemBus::connect(config.bus.timeout)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = query::print_sensors(
        &bus,
        &config.sensors,
        &config.bus.namespace,
        sensor_type,
        &mut out,
    )
    .context("Failed to write sensor output")?;

    info!(
        "Queried sensors: {} printed, {} failed, {} filtered",
        summary.printed, summary.failed, summary.filtered
    );
    Ok(summary)
}
