// Domain layer - pure data types and coordinate math
pub mod gamepad;
pub mod instruction;
pub mod mapping;
pub mod status;
