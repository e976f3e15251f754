//! Error taxonomy for the capture workflow.
//!
//! Camera failures are fatal to the start attempt, probe failures degrade
//! silently to absent coordinates, and upload failures are recoverable
//! (the captured image is retained). Nothing is retried automatically;
//! all recovery is user-initiated.

use thiserror::Error;

/// Camera acquisition errors.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Permission denied, no device, or a platform error during acquisition.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
}

/// One-shot geolocation probe failures. Logged, never surfaced to the user.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("position permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Frame capture and still-image encoding errors.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Capture was attempted without a live stream. Caller error.
    #[error("no active camera stream")]
    StreamInactive,

    #[error("jpeg encode failed: {0}")]
    Encode(String),
}

/// Upload exchange errors. All three return the workflow to preview with
/// the captured image intact so the user can retry manually.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The backend answered with a non-success status.
    #[error("upload rejected: HTTP {status} {status_text}")]
    Rejected { status: u16, status_text: String },

    /// No response at all (DNS, connect, or mid-transfer failure).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered 2xx but the body was not valid result JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors returned by `SessionWorkflow` operations.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The operation is not defined for the current state; the state is
    /// left unchanged.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}
