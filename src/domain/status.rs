// Status domain model - battery level and monitor messages
use serde::Deserialize;
use std::fmt;

/// Last reported battery charge, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BatteryLevel {
    pub level: f64,
}

/// Message severity. The backend is free to invent new type names, so
/// anything outside the known vocabulary is carried through verbatim
/// instead of failing the whole message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Other(String),
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Other(name) => name,
        };
        f.write_str(s)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "INFO" => Severity::Info,
            "WARNING" => Severity::Warning,
            "ERROR" => Severity::Error,
            _ => Severity::Other(name),
        })
    }
}

/// One line of the scrolling monitor, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusMessage {
    pub tag: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}
