//! Best-effort geolocation probe.
//!
//! One probe task is fired per camera start. It runs independently of the
//! capture path and writes the shared coordinates slot whenever it
//! resolves; capture reads whatever the slot holds at that instant. A
//! failed or unresolved probe leaves the slot empty and is only logged.

use crate::device::DeviceMediaPort;
use std::sync::{Arc, Mutex};

/// Resolved device position, attached to an upload when available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
}

/// Slot the probe task writes and the capture path reads.
pub type SharedCoordinates = Arc<Mutex<Option<Coordinates>>>;

pub struct LocationProbe {
    port: Arc<dyn DeviceMediaPort>,
}

impl LocationProbe {
    pub fn new(port: Arc<dyn DeviceMediaPort>) -> Self {
        Self { port }
    }

    /// Fire one position request and return immediately.
    ///
    /// No timeout and no de-duplication: a probe still pending from an
    /// earlier camera start keeps running and may fill the slot later.
    pub fn spawn(&self, slot: SharedCoordinates) {
        let port = Arc::clone(&self.port);
        tokio::spawn(async move {
            match port.request_position().await {
                Ok(pos) => {
                    let coords = Coordinates {
                        latitude: pos.latitude,
                        longitude: pos.longitude,
                        accuracy_m: pos.accuracy_m,
                    };
                    log::info!(
                        "[PROBE] Position resolved: lat={:.6} lng={:.6} (±{:.0}m)",
                        coords.latitude,
                        coords.longitude,
                        coords.accuracy_m
                    );
                    *slot.lock().unwrap() = Some(coords);
                }
                Err(e) => {
                    log::warn!("[PROBE] Position unavailable: {}", e);
                }
            }
        });
    }
}
