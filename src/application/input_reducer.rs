// Gamepad input reducer - debounces sticks and buttons into instructions
use crate::domain::gamepad::{GamepadSnapshot, JoystickState, Stick, StickAxes};
use crate::domain::instruction::Instruction;
use std::collections::BTreeMap;

/// Source of gamepad snapshots. `None` means no device is connected, which
/// is a no-op for the reducer, never an error. Implemented by the gilrs
/// adapter in production and by scripted sequences in tests.
pub trait InputSource: Send {
    fn snapshot(&mut self) -> Option<GamepadSnapshot>;
}

#[derive(Debug, Clone)]
pub struct ReducerSettings {
    /// Dead zone: axis magnitudes below this read as centered.
    pub tolerance: f64,
    pub left: StickAxes,
    pub right: StickAxes,
    /// Button index to instruction. Unmapped indices emit nothing.
    pub button_map: BTreeMap<usize, Instruction>,
}

impl Default for ReducerSettings {
    fn default() -> Self {
        let mut button_map = BTreeMap::new();
        button_map.insert(0, Instruction::Play);
        button_map.insert(1, Instruction::Pause);
        button_map.insert(2, Instruction::SpeedDown);
        button_map.insert(3, Instruction::SpeedUp);
        button_map.insert(8, Instruction::Abort);
        button_map.insert(9, Instruction::Reboot);
        Self {
            tolerance: 0.05,
            left: StickAxes { x: 0, y: 1 },
            right: StickAxes { x: 2, y: 5 },
            button_map,
        }
    }
}

/// Reduce one stick's axis pair to a discrete state. Pure function of the
/// axes and the tolerance. The vertical axis is evaluated first, then the
/// horizontal axis overwrites it: when both exceed the tolerance, Left/Right
/// wins. This tie-break is deliberate and matched by the tests.
pub fn reduce_axes(snapshot: &GamepadSnapshot, axes: StickAxes, tolerance: f64) -> JoystickState {
    let x = snapshot.axis(axes.x);
    let y = snapshot.axis(axes.y);

    if x.abs() < tolerance && y.abs() < tolerance {
        return JoystickState::Neutral;
    }

    let mut state = JoystickState::Neutral;
    if y < -tolerance {
        state = JoystickState::Forward;
    } else if y > tolerance {
        state = JoystickState::Backward;
    }
    if x < -tolerance {
        state = JoystickState::Left;
    } else if x > tolerance {
        state = JoystickState::Right;
    }
    state
}

fn direction_instruction(state: JoystickState) -> Option<Instruction> {
    match state {
        JoystickState::Forward => Some(Instruction::Forward),
        JoystickState::Backward => Some(Instruction::Backward),
        JoystickState::Left => Some(Instruction::Left),
        JoystickState::Right => Some(Instruction::Right),
        JoystickState::Brake => Some(Instruction::Brake),
        JoystickState::Neutral => None,
    }
}

/// Turns per-tick snapshots into a stream of instructions. Holds the
/// previous joystick states and button flags across ticks so that only
/// transitions emit.
pub struct GamepadReducer {
    settings: ReducerSettings,
    previous_left: JoystickState,
    previous_right: JoystickState,
    previous_buttons: Vec<bool>,
    connected: bool,
}

impl GamepadReducer {
    pub fn new(settings: ReducerSettings) -> Self {
        Self {
            settings,
            previous_left: JoystickState::Neutral,
            previous_right: JoystickState::Neutral,
            previous_buttons: Vec::new(),
            connected: false,
        }
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// One poll tick. Emits at most one instruction per stick transition and
    /// one per button press edge. A disconnect clears the baselines so a
    /// later reconnect cannot produce a spurious transition.
    pub fn tick(&mut self, snapshot: Option<GamepadSnapshot>) -> Vec<Instruction> {
        let Some(snapshot) = snapshot else {
            if self.connected {
                tracing::info!("gamepad disconnected");
            }
            self.reset_baseline();
            return Vec::new();
        };
        if !self.connected {
            tracing::info!("gamepad connected");
            self.connected = true;
        }

        let mut emitted = Vec::new();
        self.previous_left = Self::step_stick(
            reduce_axes(&snapshot, self.settings.left, self.settings.tolerance),
            self.previous_left,
            Stick::Left,
            &mut emitted,
        );
        self.previous_right = Self::step_stick(
            reduce_axes(&snapshot, self.settings.right, self.settings.tolerance),
            self.previous_right,
            Stick::Right,
            &mut emitted,
        );
        self.step_buttons(&snapshot, &mut emitted);
        emitted
    }

    fn step_stick(
        current: JoystickState,
        previous: JoystickState,
        stick: Stick,
        emitted: &mut Vec<Instruction>,
    ) -> JoystickState {
        if current == previous {
            return current;
        }
        // Releasing a deflected stick brakes; entering a direction steers.
        let instruction = if current == JoystickState::Neutral {
            Some(Instruction::Brake)
        } else {
            direction_instruction(current)
        };
        if let Some(instruction) = instruction {
            tracing::debug!(?stick, ?current, %instruction, "stick transition");
            emitted.push(instruction);
        }
        current
    }

    fn step_buttons(&mut self, snapshot: &GamepadSnapshot, emitted: &mut Vec<Instruction>) {
        for (index, &pressed) in snapshot.buttons.iter().enumerate() {
            let was_pressed = self.previous_buttons.get(index).copied().unwrap_or(false);
            if pressed && !was_pressed {
                if let Some(&instruction) = self.settings.button_map.get(&index) {
                    tracing::debug!(index, %instruction, "button press edge");
                    emitted.push(instruction);
                } else {
                    tracing::trace!(index, "unmapped button pressed");
                }
            }
        }
        self.previous_buttons = snapshot.buttons.clone();
    }

    fn reset_baseline(&mut self) {
        self.previous_left = JoystickState::Neutral;
        self.previous_right = JoystickState::Neutral;
        self.previous_buttons.clear();
        self.connected = false;
    }
}
