// Monitor line formatting
use crate::domain::status::StatusMessage;

/// One scrolling monitor line, e.g. `[ERROR] Network: Failed to connect`.
pub fn format_message(message: &StatusMessage) -> String {
    format!("[{}] {}: {}", message.severity, message.tag, message.message)
}

/// Battery readout for the footer; a dash until the first reading arrives.
pub fn format_battery(level: Option<f64>) -> String {
    match level {
        Some(level) => format!("battery {level:.0}%"),
        None => "battery --%".to_string(),
    }
}
