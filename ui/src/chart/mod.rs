//! Radar chart: pure geometry plus its two renderings (live component and
//! standalone SVG markup for raster export).

pub mod radar;
pub mod svg;
mod view;

pub use radar::{build_radar_chart, build_stats_chart, RadarDescription, RadarLayout, TextAnchor};
pub use view::RadarChart;

/// Paint values shared by both renderings.
pub struct RadarStyle;

impl RadarStyle {
    pub const GRID_STROKE: &'static str = "rgba(255,165,0,0.06)";
    pub const AXIS_STROKE: &'static str = "rgba(255,165,0,0.12)";
    pub const LABEL_FILL: &'static str = "#FFD27F";
    pub const LABEL_SIZE: f64 = 16.0;
    pub const POLYGON_FILL: &'static str = "rgba(255,165,0,0.14)";
    pub const POLYGON_STROKE: &'static str = "rgba(255,165,0,0.95)";
    pub const POLYGON_STROKE_WIDTH: f64 = 2.0;
    pub const DOT_FILL: &'static str = "rgba(255,165,0,0.95)";
    pub const VALUE_SIZE: f64 = 12.0;
}
