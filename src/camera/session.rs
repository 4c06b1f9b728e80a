// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Camera session lifecycle.
//!
//! The session owns a worker thread that acquires the device, then keeps
//! copying frames into shared state until it is told to stop. Acquisition
//! happens off the UI thread so a slow permission prompt never blocks the
//! window. Stopping (explicitly or by dropping the session) always joins the
//! worker, and the worker always drops the device before it exits.

use super::{CameraBackend, CameraError, CaptureRequest, Frame};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Consecutive read failures after which the device counts as lost.
const MAX_READ_FAILURES: u32 = 30;
/// Pause between polls when the device has no frame ready.
const IDLE_POLL: Duration = Duration::from_millis(5);

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraStatus {
    /// Waiting for the device (and the user's permission).
    Acquiring,
    /// Frames are flowing.
    Live { width: u32, height: u32 },
    /// The device could not be acquired or was lost.
    Failed(CameraError),
    /// The session was stopped.
    Released,
}

/// Messages from the worker thread.
enum CameraEvent {
    Ready { width: u32, height: u32 },
    Failed(CameraError),
}

/// State shared with the worker thread.
struct Shared {
    running: AtomicBool,
    latest: Mutex<Option<Frame>>,
    frame_serial: AtomicU64,
}

/// A running (or finished) camera session.
pub struct CameraSession {
    shared: Arc<Shared>,
    events: Receiver<CameraEvent>,
    worker: Option<JoinHandle<()>>,
    status: CameraStatus,
    /// Failure that happened before the first poll could see it.
    unreported: Option<CameraError>,
}

impl CameraSession {
    /// Start acquiring a device from `backend` in the background.
    pub fn start(backend: Box<dyn CameraBackend>, request: CaptureRequest) -> Self {
        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            latest: Mutex::new(None),
            frame_serial: AtomicU64::new(0),
        });
        let (sender, events) = channel();

        let worker_shared = shared.clone();
        let worker = std::thread::Builder::new()
            .name("camera".to_string())
            .spawn(move || run_worker(backend, request, worker_shared, sender));

        let (worker, status, unreported) = match worker {
            Ok(handle) => (Some(handle), CameraStatus::Acquiring, None),
            Err(e) => {
                log::error!("Failed to spawn camera thread: {}", e);
                let error = CameraError::DeviceUnavailable(e.to_string());
                (None, CameraStatus::Failed(error.clone()), Some(error))
            }
        };

        Self {
            shared,
            events,
            worker,
            status,
            unreported,
        }
    }

    /// Apply pending worker events.
    ///
    /// Returns the failure if the session failed since the last poll, so the
    /// caller can tell the user exactly once.
    pub fn poll(&mut self) -> Option<CameraError> {
        if self.status == CameraStatus::Released {
            return None;
        }
        let mut newly_failed = self.unreported.take();
        loop {
            match self.events.try_recv() {
                Ok(CameraEvent::Ready { width, height }) => {
                    log::info!("Camera ready ({}x{})", width, height);
                    self.status = CameraStatus::Live { width, height };
                }
                Ok(CameraEvent::Failed(error)) => {
                    log::error!("Camera failed: {}", error);
                    self.status = CameraStatus::Failed(error.clone());
                    newly_failed = Some(error);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        newly_failed
    }

    pub fn status(&self) -> &CameraStatus {
        &self.status
    }

    /// Check whether frames are flowing.
    pub fn is_live(&self) -> bool {
        matches!(self.status, CameraStatus::Live { .. })
    }

    /// Increments every time the worker stores a new frame.
    pub fn frame_serial(&self) -> u64 {
        self.shared.frame_serial.load(Ordering::Acquire)
    }

    /// Copy of the most recent frame.
    pub fn latest_frame(&self) -> Option<Frame> {
        let latest = self
            .shared
            .latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        latest.clone()
    }

    /// Stop the worker and release the device. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Camera thread panicked");
            }
            log::info!("Camera session released");
        }
        self.status = CameraStatus::Released;
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

fn run_worker(
    mut backend: Box<dyn CameraBackend>,
    request: CaptureRequest,
    shared: Arc<Shared>,
    events: Sender<CameraEvent>,
) {
    let mut source = match backend.open(&request) {
        Ok(source) => source,
        Err(error) => {
            let _ = events.send(CameraEvent::Failed(error));
            return;
        }
    };

    // Stopped while the device was being acquired: the source is dropped on return
    if !shared.running.load(Ordering::SeqCst) {
        log::debug!("Camera session stopped during acquisition");
        return;
    }

    let mut announced = false;
    let mut failures = 0;
    let opened_at = Instant::now();

    while shared.running.load(Ordering::SeqCst) {
        if !announced && opened_at.elapsed() > request.first_frame_timeout {
            log::warn!("Camera sent no frame within {:?}", request.first_frame_timeout);
            let _ = events.send(CameraEvent::Failed(CameraError::DeviceUnavailable(
                "the camera opened but sent no frames".to_string(),
            )));
            break;
        }

        match source.read_frame() {
            Ok(Some(frame)) => {
                failures = 0;
                if !announced {
                    announced = true;
                    let _ = events.send(CameraEvent::Ready {
                        width: frame.width,
                        height: frame.height,
                    });
                }
                let mut latest = shared
                    .latest
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                *latest = Some(frame);
                drop(latest);
                shared.frame_serial.fetch_add(1, Ordering::AcqRel);
            }
            Ok(None) => std::thread::sleep(IDLE_POLL),
            Err(error) => {
                failures += 1;
                log::warn!("Camera read failed ({}/{}): {}", failures, MAX_READ_FAILURES, error);
                if failures >= MAX_READ_FAILURES {
                    let _ = events.send(CameraEvent::Failed(CameraError::DeviceUnavailable(
                        error.to_string(),
                    )));
                    break;
                }
                std::thread::sleep(IDLE_POLL);
            }
        }
    }
}
