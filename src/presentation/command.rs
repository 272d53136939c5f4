// Console command parsing for the stdin control loop
use crate::domain::instruction::Instruction;

/// User actions typed at the console, mirroring the dashboard's sidebar
/// buttons plus a manual instruction escape hatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Pause mapping and tell the rover to hold.
    Pause,
    /// Resume mapping.
    Resume,
    /// Clear the map and restart mapping.
    ResetMap,
    /// Export the current map as an SVG file.
    Snapshot,
    /// Print the battery level and the monitor log.
    Status,
    /// Send one instruction by name.
    Send(Instruction),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error(transparent)]
    BadInstruction(#[from] crate::domain::instruction::UnknownInstruction),
}

pub fn parse(line: &str) -> Result<ConsoleCommand, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "pause" => ConsoleCommand::Pause,
        "resume" | "play" => ConsoleCommand::Resume,
        "reset" => ConsoleCommand::ResetMap,
        "snapshot" => ConsoleCommand::Snapshot,
        "status" => ConsoleCommand::Status,
        "send" => {
            let name = words.next().ok_or_else(|| {
                CommandError::Unknown("send needs an instruction name".to_string())
            })?;
            ConsoleCommand::Send(name.parse::<Instruction>()?)
        }
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}
