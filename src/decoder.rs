use log::debug;

use crate::error::{DecodeError, StreamError};
use crate::models::{SensorRecord, SensorValue, Threshold};
use crate::protocol::{PropertyStream, ValueType};

pub const VALUE_PROPERTY: &str = "Value";

/// Where a recognised property lands in the [`SensorRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySlot {
    Value,
    Threshold(Threshold),
}

impl PropertySlot {
    /// Exact-match lookup. `None` means the property is not one we interpret.
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            VALUE_PROPERTY => Some(PropertySlot::Value),
            "CriticalAlarmLow" => Some(PropertySlot::Threshold(Threshold::LowerCritical)),
            "CriticalAlarmHigh" => Some(PropertySlot::Threshold(Threshold::UpperCritical)),
            "WarningAlarmLow" => Some(PropertySlot::Threshold(Threshold::LowerWarning)),
            "WarningAlarmHigh" => Some(PropertySlot::Threshold(Threshold::UpperWarning)),
            _ => None,
        }
    }
}

/// Decode one `GetAll` reply for `object` into a sensor record.
///
/// Unknown properties are skipped. The outer container is closed on every
/// path, including after a fatal error part way through the entries.
pub fn decode<S>(stream: &mut S, object: &str) -> Result<SensorRecord, DecodeError>
where
    S: PropertyStream + ?Sized,
{
    let protocol = |source: StreamError| DecodeError::Protocol {
        object: object.to_string(),
        source,
    };

    stream.open_properties().map_err(protocol)?;

    let mut record = SensorRecord::default();
    let walked = decode_entries(stream, object, &mut record);
    stream.close_properties();
    walked?;

    if record.value.is_none() {
        return Err(DecodeError::MissingValue {
            object: object.to_string(),
        });
    }

    Ok(record)
}

fn decode_entries<S>(
    stream: &mut S,
    object: &str,
    record: &mut SensorRecord,
) -> Result<(), DecodeError>
where
    S: PropertyStream + ?Sized,
{
    let protocol = |source: StreamError| DecodeError::Protocol {
        object: object.to_string(),
        source,
    };

    while stream.next_entry().map_err(protocol)? {
        let name = stream.read_name().map_err(protocol)?;

        match PropertySlot::for_name(&name) {
            Some(PropertySlot::Value) => {
                record.value = Some(read_value(stream, object)?);
            }
            Some(PropertySlot::Threshold(threshold)) => {
                let state = stream.read_bool().map_err(protocol)?;
                record.thresholds.set(threshold, state);
            }
            None => {
                debug!("{}: skipping property {}", object, name);
                stream.skip_value().map_err(protocol)?;
            }
        }

        stream.close_entry().map_err(protocol)?;
    }

    Ok(())
}

fn read_value<S>(stream: &mut S, object: &str) -> Result<SensorValue, DecodeError>
where
    S: PropertyStream + ?Sized,
{
    let protocol = |source: StreamError| DecodeError::Protocol {
        object: object.to_string(),
        source,
    };

    match stream.peek_value_type().map_err(protocol)? {
        ValueType::Double => Ok(SensorValue::Double(stream.read_f64().map_err(protocol)?)),
        ValueType::Int64 => Ok(SensorValue::Int64(stream.read_i64().map_err(protocol)?)),
        other => Err(DecodeError::TypeMismatch {
            object: object.to_string(),
            signature: other.signature().to_string(),
        }),
    }
}
