// gilrs-backed input source
use crate::application::input_reducer::InputSource;
use crate::domain::gamepad::GamepadSnapshot;
use gilrs::{Axis, Button, Gilrs};

// Snapshot layout follows the W3C standard gamepad mapping, which is what
// the default stick/button configuration indexes into. Vertical axes are
// negated: in snapshots, up is negative.
const AXIS_ORDER: [Option<Axis>; 6] = [
    Some(Axis::LeftStickX),
    Some(Axis::LeftStickY),
    Some(Axis::RightStickX),
    None,
    None,
    Some(Axis::RightStickY),
];

const BUTTON_ORDER: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

fn inverted(axis: Axis) -> bool {
    matches!(axis, Axis::LeftStickY | Axis::RightStickY)
}

/// Reads the first connected gamepad through gilrs. The gilrs context is not
/// thread-movable on every platform, so this source lives on a dedicated
/// polling thread.
pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn new() -> anyhow::Result<Self> {
        let gilrs = Gilrs::new()
            .map_err(|e| anyhow::anyhow!("failed to initialize gamepad backend: {e}"))?;
        Ok(Self { gilrs })
    }
}

impl InputSource for GilrsSource {
    fn snapshot(&mut self) -> Option<GamepadSnapshot> {
        // Drain the event queue so cached gamepad state is current.
        while self.gilrs.next_event().is_some() {}

        let (_id, pad) = self.gilrs.gamepads().next()?;

        let axes = AXIS_ORDER
            .iter()
            .map(|slot| match slot {
                Some(axis) => {
                    let value = pad.axis_data(*axis).map(|d| d.value()).unwrap_or(0.0) as f64;
                    if inverted(*axis) { -value } else { value }
                }
                None => 0.0,
            })
            .collect();
        let buttons = BUTTON_ORDER.iter().map(|&b| pad.is_pressed(b)).collect();

        Some(GamepadSnapshot::new(axes, buttons))
    }
}
