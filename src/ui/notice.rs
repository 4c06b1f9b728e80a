// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! One-shot notice shown when the camera cannot be used.

use crate::camera::CameraError;

const HEADLINE: &str = "Unable to access the camera. Please make sure camera access has been granted.";

/// Pending camera failure message, if any.
#[derive(Debug, Default)]
pub struct FailureNotice {
    detail: Option<String>,
}

impl FailureNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the notice for `error`.
    pub fn raise(&mut self, error: &CameraError) {
        self.detail = Some(error.to_string());
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.detail.is_some()
    }

    /// Show the notice until the user dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) {
        let Some(detail) = &self.detail else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Camera unavailable")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(HEADLINE);
                ui.add_space(4.0);
                ui.label(egui::RichText::new(detail).weak().small());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.detail = None;
        }
    }
}
