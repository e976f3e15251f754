//! Still-image capture — one video frame to an encoded JPEG artifact.
//!
//! Frames are encoded in memory at their native dimensions; no disk I/O.
//! Stream lifetime is the caller's concern: the camera is stopped by the
//! workflow after a successful capture, never here.

use crate::device::VideoFrame;
use crate::error::CaptureError;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;

/// JPEG quality for captured stills.
pub const JPEG_QUALITY: u8 = 90;

/// Encode a raw RGB frame as a JPEG at [`JPEG_QUALITY`].
///
/// Must only be called with a frame grabbed from a live stream; the frame
/// carries its own native dimensions.
pub fn capture(frame: &VideoFrame) -> Result<Vec<u8>, CaptureError> {
    let start = std::time::Instant::now();

    let image = image::RgbImage::from_raw(frame.width, frame.height, frame.pixels.clone())
        .ok_or_else(|| {
            CaptureError::Encode(format!(
                "frame buffer does not match {}x{}",
                frame.width, frame.height
            ))
        })?;

    let mut jpeg_bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut jpeg_bytes), JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;

    log::info!(
        "[CAPTURE] JPEG encode: {}x{} in {}ms ({} bytes)",
        frame.width,
        frame.height,
        start.elapsed().as_millis(),
        jpeg_bytes.len()
    );
    Ok(jpeg_bytes)
}
