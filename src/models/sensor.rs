use serde::Deserialize;

/// A reading as reported by the `Value` property. The variant records which
/// wire type the backend used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorValue {
    Double(f64),
    Int64(i64),
}

/// The four threshold alarm flags, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    LowerCritical,
    UpperCritical,
    LowerWarning,
    UpperWarning,
}

impl Threshold {
    pub const ALL: [Threshold; 4] = [
        Threshold::LowerCritical,
        Threshold::UpperCritical,
        Threshold::LowerWarning,
        Threshold::UpperWarning,
    ];

    /// Property name carrying this alarm on the bus.
    pub fn property(self) -> &'static str {
        match self {
            Threshold::LowerCritical => "CriticalAlarmLow",
            Threshold::UpperCritical => "CriticalAlarmHigh",
            Threshold::LowerWarning => "WarningAlarmLow",
            Threshold::UpperWarning => "WarningAlarmHigh",
        }
    }

    /// Two-letter label used in the summary output.
    pub fn label(self) -> &'static str {
        match self {
            Threshold::LowerCritical => "lc",
            Threshold::UpperCritical => "uc",
            Threshold::LowerWarning => "lw",
            Threshold::UpperWarning => "uw",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub lower_critical: bool,
    pub upper_critical: bool,
    pub lower_warning: bool,
    pub upper_warning: bool,
}

impl Thresholds {
    pub fn get(&self, threshold: Threshold) -> bool {
        match threshold {
            Threshold::LowerCritical => self.lower_critical,
            Threshold::UpperCritical => self.upper_critical,
            Threshold::LowerWarning => self.lower_warning,
            Threshold::UpperWarning => self.upper_warning,
        }
    }

    pub fn set(&mut self, threshold: Threshold, state: bool) {
        let slot = match threshold {
            Threshold::LowerCritical => &mut self.lower_critical,
            Threshold::UpperCritical => &mut self.upper_critical,
            Threshold::LowerWarning => &mut self.lower_warning,
            Threshold::UpperWarning => &mut self.upper_warning,
        };
        *slot = state;
    }

    /// Alarms currently raised, in canonical order.
    pub fn active(&self) -> impl Iterator<Item = Threshold> + '_ {
        Threshold::ALL.into_iter().filter(|t| self.get(*t))
    }
}

/// Decode target for one sensor object. `value` stays `None` until the
/// `Value` property has been read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorRecord {
    pub value: Option<SensorValue>,
    pub thresholds: Thresholds,
}

/// Service name and object path identifying one sensor on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SensorDescriptor {
    pub service: String,
    pub object: String,
}

impl SensorDescriptor {
    pub fn new(service: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            object: object.into(),
        }
    }
}
