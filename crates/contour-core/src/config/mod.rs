//! Configuration system for Contour.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod contour_config;
pub mod extraction_config;
pub mod layout_config;

pub use contour_config::{CliOverrides, ContourConfig};
pub use extraction_config::ExtractionConfig;
pub use layout_config::LayoutConfig;
