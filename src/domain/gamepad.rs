// Gamepad domain model
use serde::Deserialize;

/// Read-only view of one connected input device at one poll instant.
/// Recreated on every tick; missing axes/buttons read as centered/released,
/// so a device with fewer inputs than the configured mapping is harmless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub axes: Vec<f64>,
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    pub fn new(axes: Vec<f64>, buttons: Vec<bool>) -> Self {
        Self { axes, buttons }
    }

    pub fn axis(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

/// One analog joystick assembly, identified by its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
}

/// Which snapshot axes belong to a stick. Axis indices are per-device
/// configuration, not universal; defaults follow the W3C standard layout.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StickAxes {
    pub x: usize,
    pub y: usize,
}

/// Discrete state a stick reduces to after dead-zone filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoystickState {
    #[default]
    Neutral,
    Forward,
    Backward,
    Left,
    Right,
    Brake,
}
