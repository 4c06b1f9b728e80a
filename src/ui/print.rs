// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Print rendering.
//!
//! A print is a white card with a square image area, drawn as meshes so the
//! whole card can be tilted. Development is shown with pre-blurred textures
//! built from a small preview of the snapshot, one per half-point of blur.

use crate::io::snapshot::Snapshot;
use crate::models::photo::{PRINT_HEIGHT, PRINT_IMAGE_SIDE, PRINT_MARGIN, PRINT_WIDTH};
use egui::emath::Rot2;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, TextureHandle, TextureId, TextureOptions};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::collections::HashMap;

const CARD_COLOR: Color32 = Color32::from_rgb(250, 248, 242);
const IMAGE_BACKGROUND: Color32 = Color32::from_rgb(226, 222, 214);
/// Width of the preview the blurred textures are built from.
const PREVIEW_WIDTH: u32 = 128;

/// How a print should look this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintLook {
    /// Tilt in degrees.
    pub rotation: f32,
    /// Image opacity in [0, 1].
    pub opacity: f32,
    /// Strength of the white haze over a developing image, in [0, 1].
    pub haze: f32,
    /// Raised while being dragged.
    pub lifted: bool,
}

impl PrintLook {
    /// A developed print lying on the table.
    pub fn settled(rotation: f32, lifted: bool) -> Self {
        Self {
            rotation,
            opacity: 1.0,
            haze: 0.0,
            lifted,
        }
    }
}

/// UV rectangle that crops a `width` x `height` image to a centered square,
/// like CSS `object-fit: cover`.
pub fn cover_uv(width: u32, height: u32) -> Rect {
    if width == 0 || height == 0 {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }
    let (w, h) = (width as f32, height as f32);
    if w >= h {
        let inset = (1.0 - h / w) / 2.0;
        Rect::from_min_max(Pos2::new(inset, 0.0), Pos2::new(1.0 - inset, 1.0))
    } else {
        let inset = (1.0 - w / h) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, inset), Pos2::new(1.0, 1.0 - inset))
    }
}

/// Cache key for a blur radius, in half points.
fn blur_key(blur: f32) -> u32 {
    (blur.max(0.0) * 2.0).round() as u32
}

#[derive(Default)]
struct PrintEntry {
    sharp: Option<TextureHandle>,
    preview: Option<RgbaImage>,
    blurred: HashMap<u32, TextureHandle>,
    /// Decoding failed once; don't retry every frame.
    broken: bool,
}

/// GPU textures for prints, keyed by snapshot serial.
#[derive(Default)]
pub struct PrintTextures {
    entries: HashMap<u64, PrintEntry>,
}

impl PrintTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture of the fully developed image.
    pub fn sharp(&mut self, ctx: &egui::Context, snapshot: &Snapshot) -> Option<TextureId> {
        let entry = self.entries.entry(snapshot.serial()).or_default();
        if entry.broken {
            return None;
        }
        if entry.sharp.is_none() {
            match snapshot.decode() {
                Ok(rgba) => {
                    let color_image = color_image(&rgba);
                    entry.sharp = Some(ctx.load_texture(
                        format!("print-{}", snapshot.serial()),
                        color_image,
                        TextureOptions::LINEAR,
                    ));
                    entry.preview = Some(preview(&rgba));
                }
                Err(e) => {
                    log::warn!("Cannot show print: {:#}", e);
                    entry.broken = true;
                    return None;
                }
            }
        }
        entry.sharp.as_ref().map(|texture| texture.id())
    }

    /// Texture of the image blurred by `blur` points.
    pub fn developing(&mut self, ctx: &egui::Context, snapshot: &Snapshot, blur: f32) -> Option<TextureId> {
        let sharp = self.sharp(ctx, snapshot)?;
        let key = blur_key(blur);
        if key == 0 {
            return Some(sharp);
        }

        let entry = self.entries.get_mut(&snapshot.serial())?;
        if let Some(texture) = entry.blurred.get(&key) {
            return Some(texture.id());
        }

        let preview = entry.preview.as_ref()?;
        // Blur is specified in display points over the cropped square
        let side = preview.width().min(preview.height()) as f32;
        let sigma = key as f32 / 2.0 * side / PRINT_IMAGE_SIDE;
        let blurred = imageops::blur(preview, sigma);
        let texture = ctx.load_texture(
            format!("print-{}-blur-{}", snapshot.serial(), key),
            color_image(&blurred),
            TextureOptions::LINEAR,
        );
        let id = texture.id();
        entry.blurred.insert(key, texture);
        Some(id)
    }

    /// Free the development textures once the print is done developing.
    pub fn finish_developing(&mut self, serial: u64) {
        if let Some(entry) = self.entries.get_mut(&serial) {
            entry.blurred.clear();
            entry.preview = None;
        }
    }
}

fn color_image(rgba: &RgbaImage) -> egui::ColorImage {
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

fn preview(rgba: &RgbaImage) -> RgbaImage {
    let width = PREVIEW_WIDTH.min(rgba.width()).max(1);
    let height = ((rgba.height() as u64 * width as u64) / rgba.width().max(1) as u64).max(1) as u32;
    imageops::resize(rgba, width, height, FilterType::Triangle)
}

/// Paint a print whose unrotated card has its top-left corner at `origin`.
pub fn paint(
    painter: &Painter,
    origin: Pos2,
    texture: Option<TextureId>,
    uv: Rect,
    look: PrintLook,
) {
    let card = Rect::from_min_size(origin, egui::vec2(PRINT_WIDTH, PRINT_HEIGHT));
    let center = card.center();
    let rot = Rot2::from_angle(look.rotation.to_radians());

    // Shadow
    let (spread, drop, alpha) = if look.lifted { (10.0, 18.0, 90) } else { (4.0, 10.0, 60) };
    let shadow = card.expand(spread).translate(egui::vec2(0.0, drop));
    painter.add(rotated(solid(shadow, Color32::from_black_alpha(alpha)), rot, center));

    painter.add(rotated(solid(card, CARD_COLOR), rot, center));

    let image_rect = Rect::from_min_size(
        origin + egui::vec2(PRINT_MARGIN, PRINT_MARGIN),
        egui::vec2(PRINT_IMAGE_SIDE, PRINT_IMAGE_SIDE),
    );
    painter.add(rotated(solid(image_rect, IMAGE_BACKGROUND), rot, center));

    if let Some(texture) = texture {
        let mut mesh = Mesh::with_texture(texture);
        mesh.add_rect_with_uv(image_rect, uv, Color32::WHITE.gamma_multiply(look.opacity.clamp(0.0, 1.0)));
        painter.add(rotated(mesh, rot, center));
    }

    if look.haze > 0.0 {
        let top = Color32::from_white_alpha((look.haze.clamp(0.0, 1.0) * 0.8 * 255.0) as u8);
        painter.add(rotated(vertical_gradient(image_rect, top, Color32::TRANSPARENT), rot, center));
    }
}

fn solid(rect: Rect, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.add_colored_rect(rect, color);
    mesh
}

fn vertical_gradient(rect: Rect, top: Color32, bottom: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn rotated(mut mesh: Mesh, rot: Rot2, center: Pos2) -> Shape {
    mesh.rotate(rot, center);
    Shape::mesh(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_uv_crops_wide_frames() {
        let uv = cover_uv(640, 480);

        assert!((uv.min.x - 0.125).abs() < 1e-6);
        assert!((uv.max.x - 0.875).abs() < 1e-6);
        assert_eq!((uv.min.y, uv.max.y), (0.0, 1.0));
    }

    #[test]
    fn test_cover_uv_crops_tall_frames() {
        let uv = cover_uv(300, 600);

        assert_eq!((uv.min.x, uv.max.x), (0.0, 1.0));
        assert!((uv.min.y - 0.25).abs() < 1e-6);
        assert!((uv.max.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_cover_uv_degenerate_size() {
        assert_eq!(cover_uv(0, 480), Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)));
    }

    #[test]
    fn test_blur_keys_follow_development_steps() {
        assert_eq!(blur_key(20.0), 40);
        assert_eq!(blur_key(19.5), 39);
        assert_eq!(blur_key(0.0), 0);
        assert_eq!(blur_key(-1.0), 0);
    }

    #[test]
    fn test_preview_keeps_aspect() {
        let image = RgbaImage::new(640, 480);
        let small = preview(&image);

        assert_eq!(small.dimensions(), (128, 96));
    }
}
