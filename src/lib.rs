//! Fuelsnap — capture workflow for roadside fuel price boards.
//!
//! Drives one photo-capture session end to end: acquire the device camera,
//! probe the position in the background, capture and encode a still,
//! upload it to the OCR backend, and hand the structured result to the
//! presentation layer.
//!
//! [`session::SessionWorkflow`] is the entry point. Hosts supply the two
//! ports ([`device::DeviceMediaPort`] for platform media access,
//! [`present::PresentationPort`] for rendering intent); everything between
//! them is wired here.

pub mod camera;
pub mod capture;
pub mod config;
pub mod device;
pub mod error;
pub mod location;
pub mod present;
pub mod session;
pub mod upload;

pub use config::Config;
pub use error::{CameraError, CaptureError, ProbeError, UploadError, WorkflowError};
pub use location::Coordinates;
pub use present::{PresentationPort, RenderedResult, ResultPresenter};
pub use session::{Session, SessionWorkflow, WorkflowState};
pub use upload::{PriceEntry, PriceValue, ScanResult, UploadClient};

/// Load `.env.local` then `.env` from the working directory and initialize
/// logging. Call once at host startup.
pub fn init() {
    for env_file in [".env.local", ".env"] {
        let path = std::path::Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
    let _ = env_logger::try_init();
}
