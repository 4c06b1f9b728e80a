// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Instant Camera
//!
//! A desktop toy that turns the webcam into an instant-film camera: take a
//! shot, watch the print slide out and develop, then drag it around the
//! window to build a collage.

mod app;
mod audio;
mod camera;
mod config;
mod io;
mod models;
mod surface;
mod ui;
mod util;

use anyhow::Result;
use app::InstantCameraApp;
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Instant Camera"),
        ..Default::default()
    };

    let backend = camera::default_backend();

    // Run the application
    eframe::run_native(
        "Instant Camera",
        options,
        Box::new(move |_cc| Ok(Box::new(InstantCameraApp::new(config, backend)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
