//! Failure taxonomy for the export pipeline.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    /// A previous export has not finished yet; the trigger is ignored.
    #[error("an export is already in progress")]
    InFlight,
    #[error("unable to measure the profile card: {0}")]
    Measure(String),
    #[error("profile card has no visible area ({width}×{height})")]
    EmptySurface { width: f64, height: f64 },
    #[error("unable to build card snapshot: {0}")]
    Snapshot(String),
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("unable to deliver file: {0}")]
    Delivery(String),
    #[error("platform unavailable: {0}")]
    Platform(String),
}

impl ExportError {
    /// Line shown to the user underneath the export button.
    pub fn user_message(&self) -> String {
        format!("Export failed: {} ({self})", self.hint())
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::Raster(_) => "try a different avatar image",
            Self::Measure(_) | Self::EmptySurface { .. } => {
                "make sure the card is visible and try again"
            }
            Self::Delivery(_) => "check that the file can be saved and try again",
            Self::InFlight | Self::Snapshot(_) | Self::Encode(_) | Self::Platform(_) => "try again",
        }
    }
}
