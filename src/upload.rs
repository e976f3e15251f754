//! Upload exchange with the recognition backend.
//!
//! Builds the multipart payload (JPEG plus optional coordinate fields) and
//! performs a single POST to `{base_url}/api/ocr/process`. No retries: a
//! failed upload is surfaced to the caller and the user decides what to do.

use crate::error::UploadError;
use crate::location::Coordinates;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

/// One price entry as recognized by the backend, in board order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: PriceValue,
}

/// Backend price values arrive as either JSON strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceValue {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceValue::Text(s) => f.write_str(s),
            PriceValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Structured recognition result.
///
/// Empty or absent `prices` is a valid response meaning nothing was
/// recognized. `success` and `timestamp` are extra fields some backend
/// versions include; both are tolerated and ignored by the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

pub struct UploadClient {
    client: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST the captured JPEG and, when present, the coordinate fields.
    ///
    /// The image ships as a binary part named `image` with filename
    /// `photo.jpg`; coordinates ship as the decimal-string parts
    /// `latitude`, `longitude`, `accuracy`.
    pub async fn upload(
        &self,
        image: Vec<u8>,
        coordinates: Option<Coordinates>,
    ) -> Result<ScanResult, UploadError> {
        let url = format!("{}/api/ocr/process", self.base_url.trim_end_matches('/'));
        let image_len = image.len();

        let image_part = multipart::Part::bytes(image)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(UploadError::Transport)?;
        let mut form = multipart::Form::new().part("image", image_part);
        if let Some(coords) = coordinates {
            form = form
                .text("latitude", coords.latitude.to_string())
                .text("longitude", coords.longitude.to_string())
                .text("accuracy", coords.accuracy_m.to_string());
        }

        log::info!(
            "[UPLOAD] POST {} ({} bytes, coordinates: {})",
            url,
            image_len,
            coordinates.is_some()
        );
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            log::error!("[UPLOAD] Backend returned {}", status);
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let result: ScanResult = response.json().await.map_err(|e| {
            if e.is_decode() {
                UploadError::MalformedResponse(e.to_string())
            } else {
                UploadError::Transport(e)
            }
        })?;

        log::info!(
            "[UPLOAD] Complete in {}ms: {} prices, raw_text: {}",
            start.elapsed().as_millis(),
            result.prices.len(),
            result.raw_text.is_some()
        );
        Ok(result)
    }
}
