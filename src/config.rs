// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings are read from the JSON file named by `INSTANT_CAMERA_CONFIG`.
//! Missing keys take their defaults; a missing or broken file means all
//! defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "INSTANT_CAMERA_CONFIG";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capture device index (0 is usually the built-in camera).
    pub camera_index: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Give up on a camera that opens but sends no frame for this long.
    pub first_frame_timeout_ms: u64,
    /// Play a click when the shutter fires.
    pub shutter_sound: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            frame_width: 640,
            frame_height: 480,
            first_frame_timeout_ms: 10_000,
            shutter_sound: true,
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

impl Config {
    /// Load from the file named by [`CONFIG_ENV`], falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            log::info!("{} not set, using default settings", CONFIG_ENV);
            return Self::default();
        };

        let path = Path::new(&path);
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}, using default settings", e);
                Self::default()
            }
        }
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
