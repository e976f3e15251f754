//! Session aggregate and the workflow state machine.
//!
//! `SessionWorkflow` is the finite-state coordinator: it owns the Session,
//! drives the camera, probe, capture, upload, and presentation components,
//! and enforces the transition table
//!
//! ```text
//! Idle -> CameraActive -> PreviewReady -> Uploading -> ResultShown
//!          ^        |       ^     |                        |
//!          |     capture    |  upload failure              |
//!          +--- retake -----+                 new scan --> Idle
//! ```
//!
//! There are no implicit transitions: calling an operation in a state it
//! is not defined for returns `InvalidTransition` and changes nothing.

use crate::camera::CameraController;
use crate::capture;
use crate::device::{CameraStream, DeviceMediaPort};
use crate::error::{CaptureError, WorkflowError};
use crate::location::{Coordinates, LocationProbe, SharedCoordinates};
use crate::present::{self, PresentationPort, ResultPresenter};
use crate::upload::{ScanResult, UploadClient};
use std::sync::{Arc, Mutex};

/// Workflow states. Edges are the `SessionWorkflow` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    CameraActive,
    PreviewReady,
    Uploading,
    ResultShown,
}

impl WorkflowState {
    pub fn name(self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::CameraActive => "camera-active",
            WorkflowState::PreviewReady => "preview-ready",
            WorkflowState::Uploading => "uploading",
            WorkflowState::ResultShown => "result-shown",
        }
    }
}

/// Transient state of one capture attempt.
///
/// Created once per process, reset on new-scan, never destroyed. The
/// coordinates slot is shared with the probe task; everything else is
/// mutated only by the workflow.
pub struct Session {
    pub(crate) stream: Option<Box<dyn CameraStream>>,
    pub captured_image: Option<Vec<u8>>,
    /// Live slot the probe task fills whenever it resolves.
    pub coordinates: SharedCoordinates,
    /// Snapshot of the slot taken at the instant of capture. This is what
    /// ships with the upload; a fix arriving later is never attached
    /// retroactively.
    pub captured_coordinates: Option<Coordinates>,
    pub result: Option<ScanResult>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stream: None,
            captured_image: None,
            coordinates: Arc::new(Mutex::new(None)),
            captured_coordinates: None,
            result: None,
        }
    }

    /// True while a camera stream is held.
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Current value of the shared coordinates slot.
    pub fn coordinates_now(&self) -> Option<Coordinates> {
        *self.coordinates.lock().unwrap()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SessionWorkflow {
    state: WorkflowState,
    session: Session,
    camera: CameraController,
    probe: LocationProbe,
    uploader: UploadClient,
    presenter: Arc<dyn PresentationPort>,
}

impl SessionWorkflow {
    pub fn new(
        port: Arc<dyn DeviceMediaPort>,
        uploader: UploadClient,
        presenter: Arc<dyn PresentationPort>,
    ) -> Self {
        Self {
            state: WorkflowState::Idle,
            session: Session::new(),
            camera: CameraController::new(Arc::clone(&port)),
            probe: LocationProbe::new(port),
            uploader,
            presenter,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn guard(&self, expected: WorkflowState, action: &'static str) -> Result<(), WorkflowError> {
        if self.state == expected {
            Ok(())
        } else {
            log::warn!("[WORKFLOW] Rejected {} while {}", action, self.state.name());
            Err(WorkflowError::InvalidTransition {
                state: self.state.name(),
                action,
            })
        }
    }

    /// Idle -> CameraActive. Acquires the stream, then fires the location
    /// probe; the two are coupled only by being started together.
    pub async fn start(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowState::Idle, "start")?;
        self.begin_camera().await
    }

    /// PreviewReady -> CameraActive. Discards nothing explicitly; the next
    /// capture overwrites the previous image.
    pub async fn retake(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowState::PreviewReady, "retake")?;
        self.begin_camera().await
    }

    async fn begin_camera(&mut self) -> Result<(), WorkflowError> {
        if let Err(e) = self.camera.start(&mut self.session).await {
            log::error!("[WORKFLOW] Camera start failed: {}", e);
            self.presenter
                .notify_error("Camera could not be started. Check permissions.");
            return Err(e.into());
        }
        self.probe.spawn(Arc::clone(&self.session.coordinates));
        self.state = WorkflowState::CameraActive;
        self.presenter.show_camera();
        log::info!("[WORKFLOW] -> camera-active");
        Ok(())
    }

    /// CameraActive -> PreviewReady. Grabs a frame, encodes it, releases
    /// the camera, and snapshots whatever the coordinates slot holds at
    /// this instant.
    ///
    /// A grab or encode failure leaves the workflow in CameraActive with
    /// the stream live so the user can simply try again.
    pub fn capture(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowState::CameraActive, "capture")?;

        let frame = match self.session.stream.as_mut() {
            Some(stream) => stream.grab_frame(),
            None => Err(CaptureError::StreamInactive),
        };
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("[WORKFLOW] Frame grab failed: {}", e);
                self.presenter.notify_error("Capture failed. Try again.");
                return Err(e.into());
            }
        };
        let jpeg = match capture::capture(&frame) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                log::error!("[WORKFLOW] Encode failed: {}", e);
                self.presenter.notify_error("Capture failed. Try again.");
                return Err(e.into());
            }
        };

        // Stream released and image stored before PreviewReady is entered.
        self.camera.stop(&mut self.session);
        let fix = self.session.coordinates_now();
        let summary = present::location_summary(fix.as_ref());
        self.presenter.show_preview(&jpeg, &summary);
        self.session.captured_coordinates = fix;
        self.session.captured_image = Some(jpeg);
        self.state = WorkflowState::PreviewReady;
        log::info!("[WORKFLOW] -> preview-ready (fix: {})", fix.is_some());
        Ok(())
    }

    /// PreviewReady -> Uploading -> ResultShown, or back to PreviewReady on
    /// any upload error with the captured image intact.
    pub async fn upload(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowState::PreviewReady, "upload")?;
        let image = self.session.captured_image.clone().ok_or(
            WorkflowError::InvalidTransition {
                state: self.state.name(),
                action: "upload",
            },
        )?;

        self.state = WorkflowState::Uploading;
        self.presenter.show_loading();
        log::info!("[WORKFLOW] -> uploading");

        match self
            .uploader
            .upload(image, self.session.captured_coordinates)
            .await
        {
            Ok(result) => {
                let rendered = ResultPresenter::render(&result);
                self.session.result = Some(result);
                self.state = WorkflowState::ResultShown;
                self.presenter.show_results(&rendered);
                log::info!("[WORKFLOW] -> result-shown");
                Ok(())
            }
            Err(e) => {
                log::error!("[WORKFLOW] Upload failed: {}", e);
                self.state = WorkflowState::PreviewReady;
                self.presenter.notify_error(&format!(
                    "Processing failed: {}. Make sure the backend is running.",
                    e
                ));
                Err(e.into())
            }
        }
    }

    /// ResultShown -> Idle. Clears the captured image, coordinates, and
    /// result; the Session itself lives on.
    pub fn new_scan(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowState::ResultShown, "new scan")?;
        self.session.captured_image = None;
        self.session.captured_coordinates = None;
        *self.session.coordinates.lock().unwrap() = None;
        self.session.result = None;
        self.state = WorkflowState::Idle;
        self.presenter.show_idle();
        log::info!("[WORKFLOW] -> idle");
        Ok(())
    }
}
