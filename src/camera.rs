//! Camera stream lifecycle.
//!
//! `CameraController` is the sole mutator of `Session.stream` and releases
//! every track on each exit path from the camera-active state, so the
//! device is never held past its use.

use crate::device::{DeviceMediaPort, StreamConstraints};
use crate::error::CameraError;
use crate::session::Session;
use std::sync::Arc;

pub struct CameraController {
    port: Arc<dyn DeviceMediaPort>,
    constraints: StreamConstraints,
}

impl CameraController {
    /// Controller with the default rear-facing 1920x1080 preference.
    pub fn new(port: Arc<dyn DeviceMediaPort>) -> Self {
        Self {
            port,
            constraints: StreamConstraints::default(),
        }
    }

    /// Acquire a stream and store it in the session.
    ///
    /// On failure the session is untouched; the caller stays in its prior
    /// state and must not retry automatically.
    pub async fn start(&self, session: &mut Session) -> Result<(), CameraError> {
        let stream = self.port.request_stream(&self.constraints).await?;
        log::info!(
            "[CAMERA] Stream acquired (facing {:?}, ideal {}x{})",
            self.constraints.facing,
            self.constraints.ideal_width,
            self.constraints.ideal_height
        );
        session.stream = Some(stream);
        Ok(())
    }

    /// Release every track and clear the session's stream handle.
    /// Idempotent: a session with no stream is left as-is.
    pub fn stop(&self, session: &mut Session) {
        if let Some(mut stream) = session.stream.take() {
            stream.stop();
            log::info!("[CAMERA] Stream released");
        }
    }
}
