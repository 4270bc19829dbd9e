use std::io::{self, Write};
use std::time::Instant;

use log::{debug, error};

use crate::error::QueryError;
use crate::formatter;
use crate::models::{SensorDescriptor, SensorRecord};

/// Something that can fetch and decode the properties of one sensor object.
pub trait SensorBus {
    fn read_sensor(&self, desc: &SensorDescriptor) -> Result<SensorRecord, QueryError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuerySummary {
    pub printed: usize,
    pub failed: usize,
    pub filtered: usize,
}

/// Whether `desc` lives under `<namespace><sensor_type>/`. An absent or
/// empty type matches every sensor.
pub fn matches_type(namespace: &str, desc: &SensorDescriptor, sensor_type: Option<&str>) -> bool {
    let sensor_type = match sensor_type {
        Some(t) if !t.is_empty() => t,
        _ => return true,
    };

    let Some(rest) = desc.object.strip_prefix(namespace) else {
        return false;
    };

    match rest.split_once('/') {
        Some((segment, _)) => segment == sensor_type,
        None => false,
    }
}

/// Query each matching sensor in order and write one line per object to
/// `out`. A failing object gets a diagnostic line and the loop moves on.
pub fn print_sensors<B, W>(
    bus: &B,
    sensors: &[SensorDescriptor],
    namespace: &str,
    sensor_type: Option<&str>,
    out: &mut W,
) -> io::Result<QuerySummary>
where
    B: SensorBus + ?Sized,
    W: Write,
{
    let mut summary = QuerySummary::default();

    for desc in sensors {
        if !matches_type(namespace, desc, sensor_type) {
            summary.filtered += 1;
            continue;
        }

        let start = Instant::now();
        let result = bus.read_sensor(desc);
        debug!(
            "read_sensor {} took: {} ms",
            desc.object,
            start.elapsed().as_millis()
        );

        match result {
            Ok(record) => {
                writeln!(out, "{}", formatter::format_line(desc, &record))?;
                summary.printed += 1;
            }
            Err(e) => {
                error!("{}", e);
                writeln!(out, "{}: failed to read sensor object", desc.object)?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
