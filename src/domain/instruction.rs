// Instruction domain model - the outbound command vocabulary
use std::fmt;
use std::str::FromStr;

/// A discrete command sent to the rover. Fire-and-forget: once handed to the
/// gateway there is no acknowledgment tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Forward,
    Backward,
    Left,
    Right,
    Brake,
    Abort,
    Reboot,
    SpeedUp,
    SpeedDown,
    Play,
    Pause,
}

impl Instruction {
    /// Wire name expected by the backend's `/instruction` endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instruction::Forward => "Forward",
            Instruction::Backward => "Backward",
            Instruction::Left => "Left",
            Instruction::Right => "Right",
            Instruction::Brake => "Brake",
            Instruction::Abort => "ABORT",
            Instruction::Reboot => "REBOOT",
            Instruction::SpeedUp => "SpeedUp",
            Instruction::SpeedDown => "SpeedDown",
            Instruction::Play => "Play",
            Instruction::Pause => "Pause",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instruction {
    type Err = UnknownInstruction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inst = match s.to_ascii_lowercase().as_str() {
            "forward" => Instruction::Forward,
            "backward" => Instruction::Backward,
            "left" => Instruction::Left,
            "right" => Instruction::Right,
            "brake" => Instruction::Brake,
            "abort" => Instruction::Abort,
            "reboot" => Instruction::Reboot,
            "speedup" => Instruction::SpeedUp,
            "speeddown" => Instruction::SpeedDown,
            "play" => Instruction::Play,
            "pause" => Instruction::Pause,
            _ => return Err(UnknownInstruction(s.to_string())),
        };
        Ok(inst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown instruction: {0}")]
pub struct UnknownInstruction(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(Instruction::Forward.as_str(), "Forward");
        assert_eq!(Instruction::Abort.as_str(), "ABORT");
        assert_eq!(Instruction::Reboot.as_str(), "REBOOT");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("forward".parse::<Instruction>().unwrap(), Instruction::Forward);
        assert_eq!("ABORT".parse::<Instruction>().unwrap(), Instruction::Abort);
        assert_eq!("SpeedUp".parse::<Instruction>().unwrap(), Instruction::SpeedUp);
        assert!("launch".parse::<Instruction>().is_err());
    }
}
