//! Image export: the capture pipeline, its platform rasterizers and sinks,
//! and the panel that triggers it.

mod panel;
pub mod pipeline;
pub mod raster;
pub mod sink;

pub use panel::ExportPanel;
pub use pipeline::{
    CaptureTarget, DisplaySource, DownloadSink, ExportPipeline, ExportedImage, RasterImage,
    RasterRequest, Rasterizer, SystemDisplay,
};
