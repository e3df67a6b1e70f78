//! Display metrics reported at capture time.

/// Size of the visible viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// What the display reports at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMetrics {
    pub device_pixel_ratio: Option<f64>,
    pub viewport: Viewport,
}

impl DisplayMetrics {
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            device_pixel_ratio: Some(ratio),
            viewport: Viewport::default(),
        }
    }

    /// Device pixel ratio, or 1 when missing or nonsensical.
    pub fn scale_factor(&self) -> f64 {
        self.device_pixel_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .unwrap_or(1.0)
    }
}

/// Query the current device pixel ratio and viewport.
#[cfg(target_arch = "wasm32")]
pub async fn display_metrics() -> DisplayMetrics {
    let Some(window) = web_sys::window() else {
        tracing::warn!("window unavailable; assuming pixel density 1");
        return DisplayMetrics::default();
    };
    let viewport = window
        .document()
        .and_then(|doc| doc.document_element())
        .map(|root| Viewport {
            width: f64::from(root.client_width()),
            height: f64::from(root.client_height()),
        })
        .unwrap_or_default();
    DisplayMetrics {
        device_pixel_ratio: Some(window.device_pixel_ratio()),
        viewport,
    }
}

/// Query the current device pixel ratio and viewport from the webview.
#[cfg(not(target_arch = "wasm32"))]
pub async fn display_metrics() -> DisplayMetrics {
    const QUERY: &str = "return [window.devicePixelRatio || 1, \
        document.documentElement.clientWidth, document.documentElement.clientHeight];";

    match dioxus::document::eval(QUERY).join::<(f64, f64, f64)>().await {
        Ok((ratio, width, height)) => DisplayMetrics {
            device_pixel_ratio: Some(ratio),
            viewport: Viewport { width, height },
        },
        Err(err) => {
            tracing::warn!(?err, "display metrics unavailable; assuming pixel density 1");
            DisplayMetrics::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_falls_back_to_one() {
        assert_eq!(DisplayMetrics::default().scale_factor(), 1.0);
        assert_eq!(DisplayMetrics::with_ratio(0.0).scale_factor(), 1.0);
        assert_eq!(DisplayMetrics::with_ratio(f64::NAN).scale_factor(), 1.0);
        assert_eq!(DisplayMetrics::with_ratio(-2.0).scale_factor(), 1.0);
    }

    #[test]
    fn scale_factor_uses_reported_ratio() {
        assert_eq!(DisplayMetrics::with_ratio(2.0).scale_factor(), 2.0);
        assert_eq!(DisplayMetrics::with_ratio(1.75).scale_factor(), 1.75);
    }
}
