// Status monitor - last-known battery level and a bounded message log
use crate::domain::status::{BatteryLevel, StatusMessage};
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 100;

/// Holds whatever the status polls last managed to fetch. A failed poll
/// leaves the previous reading in place; the fixed polling interval is the
/// retry mechanism.
pub struct StatusMonitor {
    battery: Option<f64>,
    messages: VecDeque<StatusMessage>,
    capacity: usize,
}

impl Default for StatusMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl StatusMonitor {
    pub fn new(capacity: usize) -> Self {
        Self {
            battery: None,
            messages: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a battery poll result. `None` (no data this tick) keeps the
    /// last known level.
    pub fn observe_battery(&mut self, reading: Option<BatteryLevel>) {
        if let Some(reading) = reading {
            self.battery = Some(reading.level);
        }
    }

    pub fn battery_level(&self) -> Option<f64> {
        self.battery
    }

    /// Append a message poll result. The backend only exposes the last
    /// message, so polling returns the same one until a new one arrives;
    /// consecutive duplicates are not re-appended. Returns true when the
    /// message was new.
    pub fn observe_message(&mut self, message: Option<StatusMessage>) -> bool {
        let Some(message) = message else {
            return false;
        };
        if self.messages.back() == Some(&message) {
            return false;
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        true
    }

    pub fn messages(&self) -> impl Iterator<Item = &StatusMessage> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::Severity;

    fn message(text: &str) -> StatusMessage {
        StatusMessage {
            tag: "System".to_string(),
            severity: Severity::Info,
            message: text.to_string(),
        }
    }

    #[test]
    fn test_failed_poll_keeps_last_battery_level() {
        let mut monitor = StatusMonitor::default();
        monitor.observe_battery(Some(BatteryLevel { level: 75.0 }));
        monitor.observe_battery(None);
        assert_eq!(monitor.battery_level(), Some(75.0));
    }

    #[test]
    fn test_battery_unknown_until_first_reading() {
        let mut monitor = StatusMonitor::default();
        monitor.observe_battery(None);
        assert_eq!(monitor.battery_level(), None);
    }

    #[test]
    fn test_duplicate_last_message_not_reappended() {
        let mut monitor = StatusMonitor::default();
        assert!(monitor.observe_message(Some(message("boot complete"))));
        assert!(!monitor.observe_message(Some(message("boot complete"))));
        assert!(monitor.observe_message(Some(message("low battery"))));
        assert_eq!(monitor.messages().count(), 2);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut monitor = StatusMonitor::new(3);
        for i in 0..5 {
            monitor.observe_message(Some(message(&format!("m{i}"))));
        }
        assert_eq!(monitor.messages().count(), 3);
        assert_eq!(monitor.latest().unwrap().message, "m4");
        assert_eq!(monitor.messages().next().unwrap().message, "m2");
    }
}
