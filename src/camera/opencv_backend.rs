// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! OpenCV `VideoCapture` backend.

use super::{CameraBackend, CameraError, CaptureRequest, Frame, FrameSource};
use opencv::{
    core::Mat,
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, CAP_ANY},
};

/// Opens cameras by index through OpenCV.
#[derive(Debug, Default)]
pub struct OpenCvBackend;

impl CameraBackend for OpenCvBackend {
    fn open(&mut self, request: &CaptureRequest) -> Result<Box<dyn FrameSource>, CameraError> {
        log::info!("Opening camera {}", request.device_index);

        let mut capture = VideoCapture::new(request.device_index, CAP_ANY)
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

        if !capture.is_opened().unwrap_or(false) {
            return Err(CameraError::DeviceUnavailable(format!(
                "camera {} could not be opened (missing device or access denied)",
                request.device_index
            )));
        }

        // Drivers are free to pick the closest mode
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, request.width as f64);
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, request.height as f64);

        Ok(Box::new(OpenCvSource {
            capture,
            bgr: Mat::default(),
            rgb: Mat::default(),
        }))
    }
}

struct OpenCvSource {
    capture: VideoCapture,
    bgr: Mat,
    rgb: Mat,
}

impl FrameSource for OpenCvSource {
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        let grabbed = self
            .capture
            .read(&mut self.bgr)
            .map_err(|e| CameraError::Frame(e.to_string()))?;
        // A failed read means the device stopped delivering, not that it is warming up
        if !grabbed {
            return Err(CameraError::Frame("camera returned no frame".to_string()));
        }
        if self.bgr.empty() {
            return Ok(None);
        }

        imgproc::cvt_color(&self.bgr, &mut self.rgb, imgproc::COLOR_BGR2RGB, 0)
            .map_err(|e| CameraError::Frame(e.to_string()))?;

        let data = self
            .rgb
            .data_bytes()
            .map_err(|e| CameraError::Frame(e.to_string()))?;

        Ok(Some(Frame {
            width: self.rgb.cols() as u32,
            height: self.rgb.rows() as u32,
            rgb: data.to_vec(),
        }))
    }
}

impl Drop for OpenCvSource {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {}", e);
        } else {
            log::info!("Camera released");
        }
    }
}
