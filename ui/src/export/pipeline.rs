//! Capture → rasterize → deliver.
//!
//! The pipeline owns no platform code itself. It talks to three seams: the
//! [`CaptureTarget`] it measures, the [`Rasterizer`] that turns the card
//! snapshot into PNG bytes, and the [`DownloadSink`] that hands the file to
//! the user. Tests plug in fixed boxes and recording sinks.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::MountedData;

use crate::core::config::ExportSettings;
use crate::core::error::ExportError;
use crate::core::format::export_filename;
use crate::core::geometry::LayoutBox;
use crate::core::platform::{self, DisplayMetrics};
use crate::profile::{CardSnapshot, ProfileSurface};

pub const PNG_MIME: &str = "image/png";

/// Something on screen whose rendered box can be measured.
pub trait CaptureTarget {
    fn measure(&self) -> impl Future<Output = Result<LayoutBox, ExportError>>;
}

impl CaptureTarget for Rc<MountedData> {
    async fn measure(&self) -> Result<LayoutBox, ExportError> {
        let rect = self
            .get_client_rect()
            .await
            .map_err(|err| ExportError::Measure(format!("{err:?}")))?;
        Ok(LayoutBox::new(rect.size.width, rect.size.height))
    }
}

/// A box that is already known; used by headless exports and tests.
impl CaptureTarget for LayoutBox {
    async fn measure(&self) -> Result<LayoutBox, ExportError> {
        Ok(*self)
    }
}

/// Source of the device pixel ratio at capture time.
pub trait DisplaySource {
    fn metrics(&self) -> impl Future<Output = DisplayMetrics>;
}

/// Asks the running platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDisplay;

impl DisplaySource for SystemDisplay {
    async fn metrics(&self) -> DisplayMetrics {
        platform::display_metrics().await
    }
}

impl DisplaySource for DisplayMetrics {
    async fn metrics(&self) -> DisplayMetrics {
        *self
    }
}

/// What to rasterize: the measured box in layout units and the scale to
/// apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterRequest {
    pub css_box: LayoutBox,
    pub scale: f64,
}

impl RasterRequest {
    pub fn pixel_size(&self) -> (u32, u32) {
        self.css_box.scaled_pixels(self.scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

pub trait Rasterizer {
    fn rasterize(
        &self,
        svg: &str,
        request: &RasterRequest,
    ) -> impl Future<Output = Result<RasterImage, ExportError>>;
}

pub trait DownloadSink {
    /// Hands the file to the user. Returns the path written, when there is one.
    fn deliver(
        &self,
        filename: &str,
        mime: &str,
        bytes: &[u8],
    ) -> impl Future<Output = Result<Option<String>, ExportError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub filename: String,
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub saved_to: Option<String>,
}

pub struct ExportPipeline<R, S, D = SystemDisplay> {
    settings: ExportSettings,
    rasterizer: R,
    sink: S,
    display: D,
    in_flight: Cell<bool>,
}

impl<R, S> ExportPipeline<R, S, SystemDisplay>
where
    R: Rasterizer,
    S: DownloadSink,
{
    pub fn new(settings: ExportSettings, rasterizer: R, sink: S) -> Self {
        Self::with_display(settings, rasterizer, sink, SystemDisplay)
    }
}

impl<R, S, D> ExportPipeline<R, S, D>
where
    R: Rasterizer,
    S: DownloadSink,
    D: DisplaySource,
{
    pub fn with_display(settings: ExportSettings, rasterizer: R, sink: S, display: D) -> Self {
        Self {
            settings,
            rasterizer,
            sink,
            display,
            in_flight: Cell::new(false),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Export the card as a PNG named after `name`.
    ///
    /// Returns `Ok(None)` when there is no mounted surface yet. A second
    /// call while one is running fails with [`ExportError::InFlight`].
    pub async fn export<T: CaptureTarget>(
        &self,
        target: Option<&T>,
        surface: &ProfileSurface,
        name: &str,
    ) -> Result<Option<ExportedImage>, ExportError> {
        let Some(target) = target else {
            tracing::debug!("export skipped: profile card is not mounted");
            return Ok(None);
        };

        if self.in_flight.replace(true) {
            tracing::debug!("export ignored: another export is in flight");
            return Err(ExportError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.run(target, surface, name).await.map(Some)
    }

    async fn run<T: CaptureTarget>(
        &self,
        target: &T,
        surface: &ProfileSurface,
        name: &str,
    ) -> Result<ExportedImage, ExportError> {
        self.settings.wait.settle().await;

        let css_box = target.measure().await?;
        if css_box.is_empty() {
            return Err(ExportError::EmptySurface {
                width: css_box.width,
                height: css_box.height,
            });
        }

        // Named `screen`: tracing's macros shadow `display`.
        let screen = self.display.metrics().await;
        let scale = self.scale_for(&screen);
        let filename = export_filename(name, &self.settings.fallback_filename);
        tracing::info!(
            %filename,
            scale,
            width = css_box.width,
            height = css_box.height,
            viewport_width = screen.viewport.width,
            viewport_height = screen.viewport.height,
            "exporting profile card"
        );

        let svg = CardSnapshot::layout(surface).to_svg(css_box, self.settings.background.as_deref());
        let request = RasterRequest { css_box, scale };
        let image = self
            .rasterizer
            .rasterize(&svg, &request)
            .await
            .inspect_err(|err| tracing::error!(%err, "rasterization failed"))?;

        let saved_to = self.sink.deliver(&filename, PNG_MIME, &image.png).await?;
        match &saved_to {
            Some(path) => tracing::info!(%path, "profile image saved"),
            None => tracing::info!(%filename, "profile image download started"),
        }

        Ok(ExportedImage {
            filename,
            png: image.png,
            width_px: image.width_px,
            height_px: image.height_px,
            saved_to,
        })
    }

    fn scale_for(&self, display: &DisplayMetrics) -> f64 {
        self.settings
            .scale_override
            .filter(|scale| scale.is_finite() && *scale > 0.0)
            .unwrap_or_else(|| display.scale_factor())
    }
}

struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
