// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Camera device boundary.
//!
//! A [`CameraBackend`] opens a device and yields a [`FrameSource`]; the
//! [`session::CameraSession`] runs a source on a worker thread and keeps the
//! latest frame around for the viewfinder and the shutter.

#[cfg(feature = "camera-opencv")]
pub mod opencv_backend;
pub mod session;

use crate::config::Config;
use std::time::Duration;
use thiserror::Error;

/// One RGB8 video frame, rows tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// What to ask the device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    pub device_index: i32,
    pub width: u32,
    pub height: u32,
    /// How long an opened device may stay silent before it counts as unavailable.
    pub first_frame_timeout: Duration,
}

impl CaptureRequest {
    pub fn from_config(config: &Config) -> Self {
        Self {
            device_index: config.camera_index,
            width: config.frame_width,
            height: config.frame_height,
            first_frame_timeout: Duration::from_millis(config.first_frame_timeout_ms),
        }
    }
}

/// Why the camera could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("no camera backend was compiled into this build")]
    BackendUnavailable,
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("failed to read camera frame: {0}")]
    Frame(String),
}

/// Opens camera devices.
pub trait CameraBackend: Send {
    /// Acquire the device. May block while the system asks for permission.
    fn open(&mut self, request: &CaptureRequest) -> Result<Box<dyn FrameSource>, CameraError>;
}

/// An acquired device. Dropping it releases the device.
pub trait FrameSource: Send {
    /// Next frame, or `None` if none is ready yet.
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError>;
}

/// Backend used when no capture library is compiled in.
#[cfg(any(test, not(feature = "camera-opencv")))]
#[derive(Debug, Default)]
pub struct UnavailableBackend;

#[cfg(any(test, not(feature = "camera-opencv")))]
impl CameraBackend for UnavailableBackend {
    fn open(&mut self, _request: &CaptureRequest) -> Result<Box<dyn FrameSource>, CameraError> {
        Err(CameraError::BackendUnavailable)
    }
}

/// The best backend this build supports.
pub fn default_backend() -> Box<dyn CameraBackend> {
    #[cfg(feature = "camera-opencv")]
    {
        Box::new(opencv_backend::OpenCvBackend)
    }
    #[cfg(not(feature = "camera-opencv"))]
    {
        log::warn!("Built without a camera backend; enable the `camera-opencv` feature");
        Box::new(UnavailableBackend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_config() {
        let config = Config {
            camera_index: 2,
            ..Config::default()
        };
        let request = CaptureRequest::from_config(&config);

        assert_eq!(request.device_index, 2);
        assert_eq!((request.width, request.height), (640, 480));
        assert_eq!(request.first_frame_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unavailable_backend_fails() {
        let result = UnavailableBackend.open(&CaptureRequest::from_config(&Config::default()));
        assert_eq!(result.err(), Some(CameraError::BackendUnavailable));
    }
}
