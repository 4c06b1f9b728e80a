// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module ties the camera session, the capture surface and the UI
//! pieces together. Prints lying on the table are painted on the background
//! layer, the camera sits above them, and the print coming out of the camera
//! or being dragged is painted above the camera.

use crate::audio;
use crate::camera::session::{CameraSession, CameraStatus};
use crate::camera::{CameraBackend, CaptureRequest};
use crate::config::Config;
use crate::io::export;
use crate::io::snapshot::Snapshot;
use crate::models::ejection::Phase;
use crate::models::photo::{PhotoId, PRINT_HEIGHT, PRINT_WIDTH};
use crate::surface::{landing_position, CaptureSurface};
use crate::ui::print::{self, PrintLook, PrintTextures};
use crate::ui::pointer::{self, route_pointer, PointerAction, PointerInput};
use crate::ui::{camera_body, notice::FailureNotice, to_pos};
use egui::{Color32, CursorIcon, Id, LayerId, Order, Rect, TextureHandle, TextureOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

const TABLE_COLOR: Color32 = Color32::from_rgb(236, 228, 214);

/// Main application state.
pub struct InstantCameraApp {
    config: Config,

    /// Live camera feed; released on exit
    camera: CameraSession,

    /// Collage and print in flight
    surface: CaptureSurface,

    /// Textures of captured prints
    prints: PrintTextures,

    /// Texture showing the live feed
    viewfinder: Option<TextureHandle>,

    /// Frame serial the viewfinder texture was last updated from
    viewfinder_serial: u64,

    /// Camera failure message
    notice: FailureNotice,

    /// Source of print tilt
    rng: StdRng,
}

impl InstantCameraApp {
    /// Create the app and start acquiring the camera from `backend`.
    pub fn new(config: Config, backend: Box<dyn CameraBackend>) -> Self {
        let request = CaptureRequest::from_config(&config);
        log::info!(
            "Requesting camera {} at {}x{}",
            request.device_index,
            request.width,
            request.height
        );

        Self {
            camera: CameraSession::start(backend, request),
            config,
            surface: CaptureSurface::new(),
            prints: PrintTextures::new(),
            viewfinder: None,
            viewfinder_serial: 0,
            notice: FailureNotice::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Copy the newest camera frame into the viewfinder texture.
    fn refresh_viewfinder(&mut self, ctx: &egui::Context) {
        let serial = self.camera.frame_serial();
        if serial == self.viewfinder_serial {
            return;
        }
        let Some(frame) = self.camera.latest_frame() else {
            return;
        };
        self.viewfinder_serial = serial;

        let expected = frame.width as usize * frame.height as usize * 3;
        if frame.rgb.len() != expected {
            log::warn!(
                "Dropping malformed {}x{} frame ({} bytes)",
                frame.width,
                frame.height,
                frame.rgb.len()
            );
            return;
        }

        let image = egui::ColorImage::from_rgb([frame.width as usize, frame.height as usize], &frame.rgb);
        match self.viewfinder {
            Some(ref mut texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.viewfinder = Some(ctx.load_texture("viewfinder", image, TextureOptions::LINEAR));
            }
        }
    }

    /// Shutter pressed: freeze the current frame into a new print.
    fn take_photo(&mut self, now: Instant) {
        let live = self.camera.is_live();
        if !self.surface.shutter_enabled(live) {
            return;
        }
        let Some(frame) = self.camera.latest_frame() else {
            log::warn!("Shutter pressed before the first frame arrived");
            return;
        };

        let snapshot = match Snapshot::encode(&frame) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                log::error!("Failed to capture photo: {:#}", e);
                return;
            }
        };

        if self.surface.press_shutter(live, snapshot, now) && self.config.shutter_sound {
            audio::play_shutter_cue();
        }
    }

    /// Save a print's PNG through a native file dialog.
    fn save_print(&self, id: PhotoId) {
        let Some(photo) = self.surface.collage().get(id) else {
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(export::default_file_name(id))
            .save_file()
        {
            match export::save_print(&photo.snapshot, &path) {
                Ok(_) => log::info!("Saved print {} to {}", id, path.display()),
                Err(e) => log::error!("Failed to save print: {:#}", e),
            }
        }
    }

    /// Route pointer input to the collage: grab, drag, release, save.
    fn handle_pointer(&mut self, ctx: &egui::Context, ejecting_card: Option<Rect>) {
        let input = PointerInput::read(ctx);

        if let PointerAction::Save(id) = route_pointer(self.surface.collage_mut(), input, ejecting_card) {
            self.save_print(id);
        }

        let collage = self.surface.collage();
        if collage.dragging().is_some() {
            ctx.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
        } else if pointer::grabbable(collage, input, ejecting_card).is_some() {
            ctx.output_mut(|o| o.cursor_icon = CursorIcon::Grab);
        }
    }

    /// Paint the prints lying on the table, plus the one being dragged on top.
    fn paint_collage(&mut self, ctx: &egui::Context) {
        let table = ctx.layer_painter(LayerId::background());
        table.rect_filled(ctx.screen_rect(), 0.0, TABLE_COLOR);
        let lifted = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("dragged_print")));

        let dragging = self.surface.collage().dragging();
        for photo in self.surface.collage().photos() {
            let texture = self.prints.sharp(ctx, &photo.snapshot);
            let uv = print::cover_uv(photo.snapshot.width(), photo.snapshot.height());
            let is_dragged = dragging == Some(photo.id);
            let painter = if is_dragged { &lifted } else { &table };
            print::paint(
                painter,
                to_pos(photo.position),
                texture,
                uv,
                PrintLook::settled(photo.rotation, is_dragged),
            );
        }
    }

    /// Paint the print sliding out of the camera; returns the card's rectangle.
    fn paint_ejection(&mut self, ctx: &egui::Context, eject_origin: egui::Pos2, now: Instant) -> Option<Rect> {
        let ejection = self.surface.ejecting()?;
        let frame = ejection.frame_at(now);
        let snapshot = ejection.snapshot().clone();

        let texture = self.prints.developing(ctx, &snapshot, frame.blur);
        let origin = eject_origin + egui::vec2(0.0, frame.slide_offset);
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("ejecting_print")));
        print::paint(
            &painter,
            origin,
            texture,
            print::cover_uv(snapshot.width(), snapshot.height()),
            PrintLook {
                rotation: 0.0,
                opacity: frame.opacity,
                haze: if frame.phase == Phase::Settled { 0.0 } else { 1.0 - frame.opacity },
                lifted: false,
            },
        );
        Some(Rect::from_min_size(origin, egui::vec2(PRINT_WIDTH, PRINT_HEIGHT)))
    }
}

impl eframe::App for InstantCameraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if let Some(error) = self.camera.poll() {
            self.notice.raise(&error);
        }
        self.refresh_viewfinder(ctx);

        // Finished prints join the collage
        let landing = landing_position(ctx.screen_rect().height());
        if let Some(id) = self.surface.advance(now, landing, &mut self.rng) {
            if let Some(photo) = self.surface.collage().get(id) {
                self.prints.finish_developing(photo.snapshot.serial());
            }
        }

        self.paint_collage(ctx);

        let live = self.camera.is_live();
        let camera = camera_body::show(
            ctx,
            self.viewfinder.as_ref(),
            self.surface.shutter_enabled(live),
            live,
        );
        if camera.shutter_clicked {
            self.take_photo(now);
        }

        let ejecting_card = self.paint_ejection(ctx, camera.eject_origin, now);
        self.handle_pointer(ctx, ejecting_card);
        self.notice.show(ctx);

        // Keep animating while the feed runs or a print is developing
        let animating = self.surface.ejecting().is_some();
        let feed_running = matches!(self.camera.status(), CameraStatus::Acquiring | CameraStatus::Live { .. });
        if animating || feed_running {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.surface.discard_ejection();
        self.camera.release();
    }
}
