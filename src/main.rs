use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::error;
use sensorquery::config::AppConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sensor-query",
    version,
    about = "Print sensor readings and threshold alarms from the system bus"
)]
struct Cli {
    /// Only query sensors of this type, e.g. `temperature` or `fan_tach`
    sensor_type: Option<String>,

    /// Configuration file (defaults to ./sensor-query.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (without logging)
    let config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        AppConfig::default()
    });

    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    if let Err(e) = sensorquery::run(&config, cli.sensor_type.as_deref()) {
        error!("Application error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
