//! Shared test doubles: a scripted device port and a recording presenter.

#![allow(dead_code)]

use async_trait::async_trait;
use fuelsnap::device::{
    CameraStream, DeviceMediaPort, Facing, Position, StreamConstraints, VideoFrame,
};
use fuelsnap::error::{CameraError, CaptureError, ProbeError};
use fuelsnap::present::{PresentationPort, RenderedResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the scripted device does with a position request.
#[derive(Clone, Copy)]
pub enum PositionScript {
    Resolves(Position),
    Fails,
    /// The request never completes, like a user ignoring the permission
    /// prompt forever.
    NeverResolves,
}

pub struct FakeDevice {
    camera_available: bool,
    position: PositionScript,
    pub streams_opened: AtomicUsize,
    live_flags: Mutex<Vec<Arc<AtomicBool>>>,
}

impl FakeDevice {
    pub fn new(position: PositionScript) -> Arc<Self> {
        Arc::new(Self {
            camera_available: true,
            position,
            streams_opened: AtomicUsize::new(0),
            live_flags: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            camera_available: false,
            position: PositionScript::NeverResolves,
            streams_opened: AtomicUsize::new(0),
            live_flags: Mutex::new(Vec::new()),
        })
    }

    /// How many handed-out streams still have live tracks.
    pub fn live_streams(&self) -> usize {
        self.live_flags
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.load(Ordering::SeqCst))
            .count()
    }

    pub fn opened(&self) -> usize {
        self.streams_opened.load(Ordering::SeqCst)
    }
}

pub struct FakeStream {
    live: Arc<AtomicBool>,
    width: u32,
    height: u32,
}

impl CameraStream for FakeStream {
    fn grab_frame(&mut self) -> Result<VideoFrame, CaptureError> {
        if !self.live.load(Ordering::SeqCst) {
            return Err(CaptureError::StreamInactive);
        }
        Ok(VideoFrame {
            width: self.width,
            height: self.height,
            pixels: vec![128; (self.width * self.height * 3) as usize],
        })
    }

    fn stop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceMediaPort for FakeDevice {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn CameraStream>, CameraError> {
        if !self.camera_available {
            return Err(CameraError::DeviceUnavailable("permission denied".into()));
        }
        assert_eq!(constraints.facing, Facing::Rear);
        assert_eq!(constraints.ideal_width, 1920);
        assert_eq!(constraints.ideal_height, 1080);

        let live = Arc::new(AtomicBool::new(true));
        self.live_flags.lock().unwrap().push(Arc::clone(&live));
        self.streams_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            live,
            width: 64,
            height: 48,
        }))
    }

    async fn request_position(&self) -> Result<Position, ProbeError> {
        match self.position {
            PositionScript::Resolves(pos) => Ok(pos),
            PositionScript::Fails => Err(ProbeError::Unavailable("no fix".into())),
            PositionScript::NeverResolves => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Everything the workflow asked the presentation layer to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Camera,
    Preview { location_summary: String },
    Loading,
    Results(RenderedResult),
    Idle,
    Error(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<Shown>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Shown> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Shown::Error(msg) => Some(msg),
                _ => None,
            })
    }

    pub fn last_preview_summary(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Shown::Preview { location_summary } => Some(location_summary),
                _ => None,
            })
    }

    pub fn last_results(&self) -> Option<RenderedResult> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Shown::Results(r) => Some(r),
                _ => None,
            })
    }
}

impl PresentationPort for RecordingPresenter {
    fn show_camera(&self) {
        self.events.lock().unwrap().push(Shown::Camera);
    }

    fn show_preview(&self, _jpeg: &[u8], location_summary: &str) {
        self.events.lock().unwrap().push(Shown::Preview {
            location_summary: location_summary.to_string(),
        });
    }

    fn show_loading(&self) {
        self.events.lock().unwrap().push(Shown::Loading);
    }

    fn show_results(&self, rendered: &RenderedResult) {
        self.events.lock().unwrap().push(Shown::Results(rendered.clone()));
    }

    fn show_idle(&self) {
        self.events.lock().unwrap().push(Shown::Idle);
    }

    fn notify_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Shown::Error(message.to_string()));
    }
}
