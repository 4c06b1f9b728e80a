// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Still images taken from the live feed.
//!
//! A captured frame is encoded to PNG right away; the PNG bytes are the
//! print's payload from then on. Decoding back to pixels only happens when a
//! texture has to be built.

use crate::camera::Frame;
use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbImage, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// A PNG-encoded still image.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    serial: u64,
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl Snapshot {
    /// Wrap already encoded PNG data.
    pub fn from_png(width: u32, height: u32, png: Vec<u8>) -> Self {
        Self {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            png,
        }
    }

    /// Render `frame` into an offscreen buffer and encode it as PNG.
    pub fn encode(frame: &Frame) -> Result<Self> {
        let buffer = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())
            .ok_or_else(|| {
                anyhow!(
                    "Frame buffer too small for {}x{} ({} bytes)",
                    frame.width,
                    frame.height,
                    frame.rgb.len()
                )
            })?;

        let mut png = Cursor::new(Vec::new());
        buffer
            .write_to(&mut png, ImageFormat::Png)
            .context("Failed to encode snapshot as PNG")?;

        Ok(Self::from_png(frame.width, frame.height, png.into_inner()))
    }

    /// Process-unique number, used as a texture cache key.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Decode the payload back into RGBA pixels.
    pub fn decode(&self) -> Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .context("Failed to decode snapshot")?;
        Ok(image.to_rgba8())
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("serial", &self.serial)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}
