// Application layer - use cases and ports
pub mod gateway;
pub mod input_reducer;
pub mod monitor;
pub mod plot;
