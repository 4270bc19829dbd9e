pub mod sensor;

pub use sensor::{SensorDescriptor, SensorRecord, SensorValue, Threshold, Thresholds};
