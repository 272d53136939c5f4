// Presentation layer - rendering and console interaction
pub mod command;
pub mod monitor_view;
pub mod svg_map;
