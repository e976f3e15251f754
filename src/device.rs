//! Device capability ports — live camera stream and one-shot geolocation.
//!
//! `DeviceMediaPort` is the thin boundary to the platform media APIs. The
//! workflow consumes it and never reimplements it; hosts supply a real
//! implementation, tests script one.

use crate::error::{CameraError, CaptureError, ProbeError};
use async_trait::async_trait;

/// Preferred sensor on devices with more than one camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Rear,
}

/// Acquisition preferences passed to `request_stream`.
///
/// Ideal values, not hard requirements: the device may hand back a stream
/// with a different native size.
#[derive(Debug, Clone)]
pub struct StreamConstraints {
    pub facing: Facing,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::Rear,
            ideal_width: 1920,
            ideal_height: 1080,
        }
    }
}

/// A single decoded video frame at the stream's native size, tightly packed
/// RGB8 (3 bytes per pixel, row-major).
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One-shot position reading from the device.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
}

/// A live capture stream handed out by the device.
pub trait CameraStream: Send {
    /// Grab the current frame at native dimensions.
    fn grab_frame(&mut self) -> Result<VideoFrame, CaptureError>;

    /// Stop every track. Safe to call more than once.
    fn stop(&mut self);

    /// True while at least one track is live.
    fn is_live(&self) -> bool;
}

/// Platform media capability: live video plus one-shot geolocation.
#[async_trait]
pub trait DeviceMediaPort: Send + Sync {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn CameraStream>, CameraError>;

    async fn request_position(&self) -> Result<Position, ProbeError>;
}
