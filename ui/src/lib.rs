//! Shared UI crate for Power Profile. Card layout, the radar chart, the
//! editor and the export pipeline live here; platform crates only launch.

pub mod chart;
pub mod components;
pub mod core;
pub mod editor;
pub mod export;
pub mod profile;
pub mod views;

/// Theme stylesheet, inlined by the platform shells.
pub const THEME_CSS: &str = include_str!("../assets/theme/main.css");
