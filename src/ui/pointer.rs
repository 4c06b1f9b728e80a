// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer routing for the collage.
//!
//! Presses only reach the table when nothing sits above it: not the camera
//! body, not a window, and not the print coming out of the camera. Once a
//! print is grabbed it follows the pointer everywhere until release.

use super::to_point;
use crate::models::collage::Collage;
use crate::models::photo::PhotoId;
use egui::{Pos2, Rect};

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub pos: Option<Pos2>,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button is held.
    pub down: bool,
    pub secondary_clicked: bool,
    /// The pointer is over an egui area (camera body, notice window).
    pub over_ui: bool,
}

impl PointerInput {
    pub fn read(ctx: &egui::Context) -> Self {
        let mut input = ctx.input(|i| Self {
            pos: i.pointer.latest_pos(),
            pressed: i.pointer.primary_pressed(),
            down: i.pointer.primary_down(),
            secondary_clicked: i.pointer.secondary_clicked(),
            over_ui: false,
        });
        input.over_ui = ctx.is_pointer_over_area();
        input
    }
}

/// What the app should do after routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    None,
    /// Offer to save this print.
    Save(PhotoId),
}

/// Apply one frame of pointer input to the collage.
///
/// `ejecting_card` is the screen rectangle of the print sliding out of the
/// camera; it covers the prints beneath it.
pub fn route_pointer(collage: &mut Collage, input: PointerInput, ejecting_card: Option<Rect>) -> PointerAction {
    if collage.dragging().is_some() {
        // Tracked anywhere in the window, not just over the table
        if let Some(pos) = input.pos {
            collage.drag_to(to_point(pos));
        }
        if !input.down {
            collage.end_drag();
        }
        return PointerAction::None;
    }

    let Some(pos) = input.pos else {
        return PointerAction::None;
    };
    if covered(input, ejecting_card, pos) {
        return PointerAction::None;
    }

    let point = to_point(pos);
    if input.pressed {
        collage.begin_drag(point);
    } else if input.secondary_clicked {
        if let Some(id) = collage.hit_test(point) {
            return PointerAction::Save(id);
        }
    }
    PointerAction::None
}

/// Print under the pointer that could be grabbed right now.
pub fn grabbable(collage: &Collage, input: PointerInput, ejecting_card: Option<Rect>) -> Option<PhotoId> {
    let pos = input.pos?;
    if covered(input, ejecting_card, pos) {
        return None;
    }
    collage.hit_test(to_point(pos))
}

fn covered(input: PointerInput, ejecting_card: Option<Rect>, pos: Pos2) -> bool {
    input.over_ui || ejecting_card.is_some_and(|card| card.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::snapshot::Snapshot;
    use crate::models::photo::{Photo, PhotoIdGenerator, Point};
    use std::sync::Arc;
    use std::time::UNIX_EPOCH;

    /// One untilted print with its top-left corner at (100, 100).
    fn collage_with_print() -> (Collage, PhotoId) {
        let id = PhotoIdGenerator::new().next(UNIX_EPOCH);
        let mut collage = Collage::new();
        let snapshot = Arc::new(Snapshot::from_png(2, 2, vec![1, 2, 3]));
        collage.add(Photo::new(id, snapshot, Point::new(100.0, 100.0), 0.0));
        (collage, id)
    }

    fn press_at(x: f32, y: f32) -> PointerInput {
        PointerInput {
            pos: Some(Pos2::new(x, y)),
            pressed: true,
            down: true,
            ..PointerInput::default()
        }
    }

    fn held_at(x: f32, y: f32) -> PointerInput {
        PointerInput {
            pos: Some(Pos2::new(x, y)),
            down: true,
            ..PointerInput::default()
        }
    }

    #[test]
    fn test_press_on_print_starts_drag() {
        let (mut collage, id) = collage_with_print();

        assert_eq!(route_pointer(&mut collage, press_at(150.0, 150.0), None), PointerAction::None);
        assert_eq!(collage.dragging(), Some(id));
    }

    #[test]
    fn test_press_over_ui_starts_no_drag() {
        let (mut collage, _) = collage_with_print();
        let input = PointerInput {
            over_ui: true,
            ..press_at(150.0, 150.0)
        };

        route_pointer(&mut collage, input, None);

        assert_eq!(collage.dragging(), None);
    }

    #[test]
    fn test_press_on_ejecting_card_starts_no_drag() {
        let (mut collage, id) = collage_with_print();
        let card = Rect::from_min_max(Pos2::new(140.0, 140.0), Pos2::new(360.0, 396.0));

        route_pointer(&mut collage, press_at(150.0, 150.0), Some(card));
        assert_eq!(collage.dragging(), None);
        assert_eq!(grabbable(&collage, held_at(150.0, 150.0), Some(card)), None);

        // The part of the print outside the card is still reachable
        route_pointer(&mut collage, press_at(120.0, 120.0), Some(card));
        assert_eq!(collage.dragging(), Some(id));
    }

    #[test]
    fn test_drag_follows_pointer_over_ui() {
        let (mut collage, id) = collage_with_print();
        route_pointer(&mut collage, press_at(150.0, 150.0), None);

        let input = PointerInput {
            over_ui: true,
            ..held_at(400.0, 300.0)
        };
        route_pointer(&mut collage, input, None);

        assert_eq!(collage.dragging(), Some(id));
        assert_eq!(collage.get(id).unwrap().position, Point::new(350.0, 250.0));
    }

    #[test]
    fn test_release_ends_drag() {
        let (mut collage, id) = collage_with_print();
        route_pointer(&mut collage, press_at(150.0, 150.0), None);
        route_pointer(&mut collage, held_at(160.0, 170.0), None);

        let release = PointerInput {
            pos: Some(Pos2::new(170.0, 190.0)),
            ..PointerInput::default()
        };
        route_pointer(&mut collage, release, None);

        assert_eq!(collage.dragging(), None);
        assert_eq!(collage.get(id).unwrap().position, Point::new(120.0, 140.0));

        // Later moves leave the print alone
        route_pointer(&mut collage, held_at(500.0, 500.0), None);
        assert_eq!(collage.get(id).unwrap().position, Point::new(120.0, 140.0));
    }

    #[test]
    fn test_secondary_click_offers_save() {
        let (mut collage, id) = collage_with_print();
        let click = PointerInput {
            pos: Some(Pos2::new(150.0, 150.0)),
            secondary_clicked: true,
            ..PointerInput::default()
        };

        assert_eq!(route_pointer(&mut collage, click, None), PointerAction::Save(id));
        assert_eq!(collage.dragging(), None);

        let on_table = PointerInput {
            pos: Some(Pos2::new(600.0, 600.0)),
            ..click
        };
        assert_eq!(route_pointer(&mut collage, on_table, None), PointerAction::None);

        let over_ui = PointerInput { over_ui: true, ..click };
        assert_eq!(route_pointer(&mut collage, over_ui, None), PointerAction::None);
    }
}
