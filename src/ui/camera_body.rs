// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The camera chassis: viewfinder, ejection slot and shutter button.
//!
//! The camera sits in the bottom-left corner of the window as its own egui
//! area, above the prints lying on the table.

use super::print::cover_uv;
use crate::models::photo::{PRINT_HEIGHT, PRINT_WIDTH};
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, TextureHandle, Vec2};

/// Outer size of the camera body.
pub const BODY_SIZE: Vec2 = Vec2::new(320.0, 430.0);
/// Distance from the window's bottom-left corner.
const CORNER_MARGIN: f32 = 32.0;
const TOP_SECTION_HEIGHT: f32 = 64.0;
const VIEWFINDER_MARGIN: f32 = 24.0;
const SHUTTER_RADIUS: f32 = 32.0;

const BODY_COLOR: Color32 = Color32::from_rgb(62, 52, 44);
const BODY_SHADE: Color32 = Color32::from_rgb(46, 40, 35);
const SHUTTER_COLOR: Color32 = Color32::from_rgb(214, 58, 44);

/// What happened to the camera this frame.
pub struct CameraBodyResponse {
    /// The shutter button was clicked (only possible while enabled).
    pub shutter_clicked: bool,
    /// Top-left corner of a print resting in front of the ejection slot.
    pub eject_origin: Pos2,
}

/// Draw the camera and handle the shutter button.
pub fn show(
    ctx: &egui::Context,
    viewfinder: Option<&TextureHandle>,
    shutter_enabled: bool,
    live: bool,
) -> CameraBodyResponse {
    egui::Area::new(egui::Id::new("camera_body"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(CORNER_MARGIN, -CORNER_MARGIN))
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(BODY_SIZE, Sense::hover());
            let painter = ui.painter();

            paint_body(painter, rect);
            let slot_y = paint_top_section(painter, rect);
            paint_viewfinder(painter, viewfinder_rect(rect), viewfinder, live);
            paint_decorations(painter, rect, live);

            let shutter_center = Pos2::new(rect.center().x, rect.bottom() - 39.0);
            let shutter_rect = Rect::from_center_size(shutter_center, Vec2::splat(SHUTTER_RADIUS * 2.0));
            let sense = if shutter_enabled { Sense::click() } else { Sense::hover() };
            let shutter = ui.interact(shutter_rect, ui.id().with("shutter"), sense);
            paint_shutter(
                ui.painter(),
                shutter_center,
                shutter_enabled,
                shutter.hovered(),
                shutter.is_pointer_button_down_on(),
            );
            let shutter = shutter.on_hover_text(if shutter_enabled {
                "Take a photo"
            } else if live {
                "Wait for the print to come out"
            } else {
                "Camera unavailable"
            });

            CameraBodyResponse {
                shutter_clicked: shutter_enabled && shutter.clicked(),
                eject_origin: Pos2::new(rect.center().x - PRINT_WIDTH / 2.0, slot_y + 4.0 - PRINT_HEIGHT),
            }
        })
        .inner
}

fn viewfinder_rect(body: Rect) -> Rect {
    let side = BODY_SIZE.x - 2.0 * VIEWFINDER_MARGIN;
    Rect::from_min_size(
        body.min + Vec2::new(VIEWFINDER_MARGIN, TOP_SECTION_HEIGHT + 16.0),
        Vec2::splat(side),
    )
}

fn paint_body(painter: &egui::Painter, rect: Rect) {
    // Drop shadow
    painter.rect_filled(
        rect.expand(6.0).translate(Vec2::new(0.0, 14.0)),
        Rounding::same(22.0),
        Color32::from_black_alpha(70),
    );
    painter.rect_filled(rect, Rounding::same(16.0), BODY_COLOR);
    // Lower half slightly darker, for a bit of depth
    let lower = Rect::from_min_max(Pos2::new(rect.left(), rect.center().y), rect.max);
    painter.rect_filled(
        lower,
        Rounding {
            nw: 0.0,
            ne: 0.0,
            sw: 16.0,
            se: 16.0,
        },
        BODY_SHADE,
    );
    painter.rect_stroke(rect, Rounding::same(16.0), Stroke::new(1.0, Color32::from_white_alpha(18)));
}

/// Paint the strip with the ejection slot; returns the slot's y coordinate.
fn paint_top_section(painter: &egui::Painter, body: Rect) -> f32 {
    let top = Rect::from_min_size(body.min, Vec2::new(body.width(), TOP_SECTION_HEIGHT));
    painter.rect_filled(
        top,
        Rounding {
            nw: 16.0,
            ne: 16.0,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_black_alpha(50),
    );

    let ridge = Rect::from_center_size(Pos2::new(top.center().x, top.top() + 10.0), Vec2::new(192.0, 4.0));
    painter.rect_filled(ridge, Rounding::same(2.0), Color32::from_black_alpha(128));

    let slot_y = top.bottom() - 4.0;
    let slot = Rect::from_center_size(Pos2::new(top.center().x, slot_y), Vec2::new(224.0, 8.0));
    painter.rect_filled(slot, Rounding::ZERO, Color32::from_black_alpha(180));
    slot_y
}

fn paint_viewfinder(painter: &egui::Painter, rect: Rect, texture: Option<&TextureHandle>, live: bool) {
    painter.rect_filled(rect, Rounding::same(8.0), Color32::BLACK);

    match texture {
        Some(texture) if live => {
            let [width, height] = texture.size();
            painter.image(
                texture.id(),
                rect.shrink(3.0),
                cover_uv(width as u32, height as u32),
                Color32::WHITE,
            );
        }
        _ => paint_camera_icon(painter, rect.center(), Color32::from_gray(110)),
    }

    painter.rect_stroke(rect, Rounding::same(8.0), Stroke::new(3.0, Color32::from_black_alpha(80)));
}

/// Simple line-art camera used when there is no feed.
fn paint_camera_icon(painter: &egui::Painter, center: Pos2, color: Color32) {
    let stroke = Stroke::new(2.5, color);
    let body = Rect::from_center_size(center + Vec2::new(0.0, 3.0), Vec2::new(48.0, 34.0));
    painter.rect_stroke(body, Rounding::same(5.0), stroke);
    let hump = Rect::from_center_size(Pos2::new(center.x, body.top() - 3.0), Vec2::new(18.0, 6.0));
    painter.rect_stroke(hump, Rounding::same(2.0), stroke);
    painter.circle_stroke(body.center(), 9.0, stroke);
}

fn paint_decorations(painter: &egui::Painter, body: Rect, live: bool) {
    // Status lamp, lit while the feed is running
    let lamp = if live {
        Color32::from_rgba_unmultiplied(239, 68, 68, 220)
    } else {
        Color32::from_rgba_unmultiplied(120, 40, 40, 200)
    };
    painter.circle_filled(body.min + Vec2::new(22.0, 22.0), 6.0, lamp);

    // Brand, running up the right-hand edge
    let galley = painter.layout_no_wrap(
        "INSTANT".to_string(),
        FontId::proportional(11.0),
        Color32::from_white_alpha(60),
    );
    let brand_pos = Pos2::new(body.right() - 10.0, body.top() + TOP_SECTION_HEIGHT + 24.0);
    painter.add(TextShape::new(brand_pos, galley, Color32::from_white_alpha(60)).with_angle(std::f32::consts::FRAC_PI_2));

    painter.text(
        body.right_bottom() + Vec2::new(-16.0, -14.0),
        Align2::RIGHT_BOTTOM,
        "SX-70",
        FontId::monospace(10.0),
        Color32::from_white_alpha(45),
    );
}

fn paint_shutter(painter: &egui::Painter, center: Pos2, enabled: bool, hovered: bool, pressed: bool) {
    let base = if !enabled {
        Color32::from_gray(96).gamma_multiply(0.6)
    } else if pressed {
        Color32::from_rgb(170, 40, 30)
    } else if hovered {
        Color32::from_rgb(232, 76, 60)
    } else {
        SHUTTER_COLOR
    };
    let radius = if pressed { SHUTTER_RADIUS - 2.0 } else { SHUTTER_RADIUS };

    painter.circle_filled(center + Vec2::new(0.0, 4.0), radius + 2.0, Color32::from_black_alpha(90));
    painter.circle_filled(center, radius, base);
    // Highlight and ring
    painter.circle_filled(center - Vec2::new(0.0, radius * 0.35), radius * 0.55, Color32::from_white_alpha(28));
    painter.circle_stroke(center, radius - 10.0, Stroke::new(4.0, Color32::from_white_alpha(70)));
    paint_camera_icon_small(painter, center);
}

fn paint_camera_icon_small(painter: &egui::Painter, center: Pos2) {
    let stroke = Stroke::new(1.8, Color32::WHITE);
    let body = Rect::from_center_size(center + Vec2::new(0.0, 1.0), Vec2::new(22.0, 15.0));
    painter.rect_stroke(body, Rounding::same(3.0), stroke);
    painter.circle_stroke(body.center(), 4.0, stroke);
}
