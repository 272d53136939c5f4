// Infrastructure layer - external dependencies and adapters
pub mod config;
pub mod gamepad;
pub mod http_gateway;
