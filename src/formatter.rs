use crate::models::{SensorDescriptor, SensorRecord, SensorValue};

/// Longest string [`format_value`] returns.
pub const MAX_VALUE_LEN: usize = 24;

/// Longest string [`format_thresholds`] returns: all four labels set.
pub const MAX_THRESHOLDS_LEN: usize = 11;

pub const UNKNOWN_VALUE: &str = "(unknown)";

pub const THRESHOLDS_OK: &str = "ok";

/// Render the reading: six fixed decimals for doubles, plain decimal for
/// integers.
///
/// Doubles too large for the fixed form within [`MAX_VALUE_LEN`] switch to
/// scientific notation.
pub fn format_value(record: &SensorRecord) -> String {
    match record.value {
        Some(SensorValue::Double(d)) => {
            let fixed = format!("{:.6}", d);
            if fixed.len() <= MAX_VALUE_LEN {
                fixed
            } else {
                format!("{:.6e}", d)
            }
        }
        Some(SensorValue::Int64(x)) => x.to_string(),
        None => UNKNOWN_VALUE.to_string(),
    }
}

/// Comma-joined labels of the raised alarms in canonical order, or `ok`.
pub fn format_thresholds(record: &SensorRecord) -> String {
    let labels: Vec<&str> = record.thresholds.active().map(|t| t.label()).collect();
    if labels.is_empty() {
        THRESHOLDS_OK.to_string()
    } else {
        labels.join(",")
    }
}

/// One output line, without the trailing newline.
pub fn format_line(desc: &SensorDescriptor, record: &SensorRecord) -> String {
    format!(
        "{}: {} {}",
        desc.object,
        format_value(record),
        format_thresholds(record)
    )
}
