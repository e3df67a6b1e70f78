//! Snapshot SVG → PNG bytes.

use crate::core::error::ExportError;
use crate::export::pipeline::{RasterImage, RasterRequest, Rasterizer};

#[cfg(not(target_arch = "wasm32"))]
pub use native::ResvgRasterizer as PlatformRasterizer;
#[cfg(target_arch = "wasm32")]
pub use web::CanvasRasterizer as PlatformRasterizer;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{encode_png, ResvgRasterizer};
#[cfg(target_arch = "wasm32")]
pub use web::CanvasRasterizer;

/// 96 dpi expressed in pixels per metre, the density of one CSS pixel.
pub const CSS_PIXELS_PER_METRE: f64 = 3779.527_559;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Arc;

    use usvg::fontdb;

    use super::*;
    use crate::profile::fonts::system_fonts;

    /// Renders with resvg into a tiny-skia pixmap.
    #[derive(Clone)]
    pub struct ResvgRasterizer {
        fontdb: Arc<fontdb::Database>,
    }

    impl Default for ResvgRasterizer {
        fn default() -> Self {
            Self {
                fontdb: system_fonts(),
            }
        }
    }

    impl ResvgRasterizer {
        pub fn with_fonts(fontdb: Arc<fontdb::Database>) -> Self {
            Self { fontdb }
        }

        pub fn render(&self, svg: &str, request: &RasterRequest) -> Result<RasterImage, ExportError> {
            let mut options = usvg::Options::default();
            options.fontdb = Arc::clone(&self.fontdb);
            let tree = usvg::Tree::from_str(svg, &options)
                .map_err(|err| ExportError::Snapshot(err.to_string()))?;

            let (width_px, height_px) = request.pixel_size();
            let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or_else(|| {
                ExportError::Raster(format!("cannot allocate a {width_px}×{height_px} bitmap"))
            })?;

            // Map the document size onto the rounded pixel grid exactly.
            let size = tree.size();
            let sx = width_px as f32 / size.width();
            let sy = height_px as f32 / size.height();
            resvg::render(
                &tree,
                tiny_skia::Transform::from_scale(sx, sy),
                &mut pixmap.as_mut(),
            );

            let png = encode_png(&pixmap, request.scale)?;
            Ok(RasterImage {
                png,
                width_px,
                height_px,
            })
        }
    }

    impl Rasterizer for ResvgRasterizer {
        async fn rasterize(&self, svg: &str, request: &RasterRequest) -> Result<RasterImage, ExportError> {
            self.render(svg, request)
        }
    }

    /// RGBA PNG with straight alpha and a `pHYs` chunk of 96 dpi × `scale`.
    pub fn encode_png(pixmap: &tiny_skia::Pixmap, scale: f64) -> Result<Vec<u8>, ExportError> {
        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let ppm = (CSS_PIXELS_PER_METRE * scale).round() as u32;
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
            encoder
                .write_header()
                .map_err(|err| ExportError::Encode(err.to_string()))?
                .write_image_data(&rgba)
                .map_err(|err| ExportError::Encode(err.to_string()))?;
        }
        Ok(buffer)
    }

}

#[cfg(target_arch = "wasm32")]
mod web {
    use base64::Engine as _;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    use super::*;

    /// Draws the snapshot onto an offscreen canvas sized box × scale.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CanvasRasterizer;

    impl Rasterizer for CanvasRasterizer {
        async fn rasterize(&self, svg: &str, request: &RasterRequest) -> Result<RasterImage, ExportError> {
            let opts = BlobPropertyBag::new();
            opts.set_type("image/svg+xml");
            let parts = js_sys::Array::new();
            parts.push(&JsValue::from_str(svg));
            let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
                .map_err(|_| ExportError::Snapshot("unable to build SVG blob".into()))?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| ExportError::Platform("unable to create SVG URL".into()))?;

            let result = draw(&url, request).await;
            Url::revoke_object_url(&url).ok();
            result
        }
    }

    async fn draw(url: &str, request: &RasterRequest) -> Result<RasterImage, ExportError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Platform("document unavailable".into()))?;

        let (width_px, height_px) = request.pixel_size();
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| ExportError::Platform("unable to create canvas".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Platform("canvas cast failed".into()))?;
        canvas.set_width(width_px);
        canvas.set_height(height_px);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| ExportError::Platform("canvas context unavailable".into()))?
            .ok_or_else(|| ExportError::Platform("canvas context missing".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Platform("context cast failed".into()))?;

        let image = HtmlImageElement::new()
            .map_err(|_| ExportError::Platform("unable to create image".into()))?;
        image.set_src(url);
        JsFuture::from(image.decode())
            .await
            .map_err(|_| ExportError::Raster("snapshot image failed to decode".into()))?;

        let css = request.css_box;
        context
            .draw_image_with_html_image_element_and_dw_and_dh(
                &image,
                0.0,
                0.0,
                f64::from(width_px),
                f64::from(height_px),
            )
            .map_err(|_| ExportError::Raster(format!("unable to draw {}×{} snapshot", css.width, css.height)))?;

        // A cross-origin avatar taints the canvas and makes this throw.
        let data_url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|err| ExportError::Raster(format!("canvas is not exportable: {err:?}")))?;

        let encoded = data_url
            .split(',')
            .nth(1)
            .ok_or_else(|| ExportError::Encode("malformed data URL".into()))?;
        let png = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| ExportError::Encode(err.to_string()))?;

        Ok(RasterImage {
            png,
            width_px,
            height_px,
        })
    }
}
