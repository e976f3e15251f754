//! Result and preview presentation.
//!
//! The workflow talks to the UI through the intent-level
//! [`PresentationPort`]; implementations own visibility toggles and
//! rendering. [`ResultPresenter`] turns backend results into render-ready
//! rows without any knowledge of the rendering technology.

use crate::location::Coordinates;
use crate::upload::ScanResult;
use base64::Engine;

/// Fixed currency suffix on every rendered price.
pub const CURRENCY: &str = "CHF";

/// Shown when the backend recognized no prices.
pub const NO_PRICES_MESSAGE: &str = "No prices recognized. Please try again.";

/// Shown with the preview when no position resolved before capture.
pub const NO_LOCATION_MESSAGE: &str = "Location not available";

/// One rendered price line.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub label: String,
    /// Value with the currency suffix, e.g. `1.85 CHF`.
    pub value: String,
}

impl std::fmt::Display for PriceRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.label, self.value)
    }
}

/// Render-ready result: price rows in backend order, plus the raw OCR text
/// block when present. Empty rows means the fallback message is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub rows: Vec<PriceRow>,
    pub raw_text: Option<String>,
}

impl RenderedResult {
    /// True when [`NO_PRICES_MESSAGE`] should be shown instead of rows.
    pub fn is_fallback(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct ResultPresenter;

impl ResultPresenter {
    /// Rows keep the order received; no re-sorting. The raw-text block is
    /// carried in both branches, fallback included.
    pub fn render(result: &ScanResult) -> RenderedResult {
        let rows = result
            .prices
            .iter()
            .map(|p| PriceRow {
                label: p.kind.clone(),
                value: format!("{} {}", p.value, CURRENCY),
            })
            .collect();
        RenderedResult {
            rows,
            raw_text: result.raw_text.clone().filter(|t| !t.is_empty()),
        }
    }
}

/// Location summary shown with the preview: 6-decimal lat/lng and rounded
/// accuracy, or the fixed fallback when no position resolved.
pub fn location_summary(coordinates: Option<&Coordinates>) -> String {
    match coordinates {
        Some(c) => format!(
            "Lat: {:.6}\nLng: {:.6}\n±{:.0}m",
            c.latitude, c.longitude, c.accuracy_m
        ),
        None => NO_LOCATION_MESSAGE.to_string(),
    }
}

/// Inline data URL for the captured JPEG, for hosts that render previews
/// from a URL source.
pub fn preview_data_url(jpeg: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}

/// Intent-level hooks the workflow drives. No DOM or widget types leak
/// through this boundary.
pub trait PresentationPort: Send + Sync {
    fn show_camera(&self);

    /// Preview of the captured image with the capture-time location summary.
    fn show_preview(&self, jpeg: &[u8], location_summary: &str);

    fn show_loading(&self);

    fn show_results(&self, rendered: &RenderedResult);

    fn show_idle(&self);

    fn notify_error(&self, message: &str);
}
