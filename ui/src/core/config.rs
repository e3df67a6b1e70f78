//! Export configuration supplied by the platform shells through context.

use serde::{Deserialize, Serialize};

use crate::core::timing;

/// Name used when the nickname is empty.
pub const DEFAULT_FILENAME: &str = "power-profile";

/// Settling delay the capture waits before measuring.
pub const DEFAULT_SETTLE_MS: u64 = 200;

/// How the pipeline lets in-flight image decodes and font loads settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaitStrategy {
    Immediate,
    FixedDelay { ms: u64 },
    /// Waits for the document's font set to report ready, bounded by `max_ms`.
    /// Native builds have no such signal and sleep `max_ms` instead.
    FontsReady { max_ms: u64 },
}

impl Default for WaitStrategy {
    fn default() -> Self {
        WaitStrategy::FixedDelay {
            ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl WaitStrategy {
    pub async fn settle(self) {
        match self {
            WaitStrategy::Immediate => {}
            WaitStrategy::FixedDelay { ms } => timing::sleep_ms(ms).await,
            WaitStrategy::FontsReady { max_ms } => fonts_ready(max_ms).await,
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fonts_ready(max_ms: u64) {
    use futures_util::future::{select, Either};
    use wasm_bindgen_futures::JsFuture;

    let ready = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.fonts().ready().ok());

    let Some(promise) = ready else {
        timing::sleep_ms(max_ms).await;
        return;
    };

    let fonts = Box::pin(JsFuture::from(promise));
    let timeout = Box::pin(timing::sleep_ms(max_ms));
    if let Either::Right(_) = select(fonts, timeout).await {
        tracing::debug!(max_ms, "font readiness timed out; capturing anyway");
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn fonts_ready(max_ms: u64) {
    timing::sleep_ms(max_ms).await;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub wait: WaitStrategy,
    pub fallback_filename: String,
    /// Replaces the device pixel ratio when set to a positive, finite value.
    pub scale_override: Option<f64>,
    /// Fill behind the card; `None` keeps the bitmap transparent.
    pub background: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            wait: WaitStrategy::default(),
            fallback_filename: DEFAULT_FILENAME.to_string(),
            scale_override: None,
            background: None,
        }
    }
}

impl ExportSettings {
    /// Settings without a settling delay, handy for deterministic captures.
    pub fn immediate() -> Self {
        Self {
            wait: WaitStrategy::Immediate,
            ..Self::default()
        }
    }
}
