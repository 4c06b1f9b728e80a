// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The collage of settled prints.
//!
//! Prints are kept in creation order; later prints are drawn on top, so
//! hit-testing walks the list backwards.

use super::drag::DragSession;
use super::photo::{Photo, PhotoId, Point};

/// Settled prints plus the (at most one) print being dragged.
#[derive(Debug, Default)]
pub struct Collage {
    photos: Vec<Photo>,
    drag: Option<DragSession>,
}

impl Collage {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    /// Append a newly settled print.
    pub fn add(&mut self, photo: Photo) {
        log::info!("Print {} settled, total: {}", photo.id, self.photos.len() + 1);
        self.photos.push(photo);
    }

    /// Move the print with `id` to `position`.
    ///
    /// Returns `false` (and changes nothing) if no print has that id.
    pub fn update_position(&mut self, id: PhotoId, position: Point) -> bool {
        match self.photos.iter_mut().find(|photo| photo.id == id) {
            Some(photo) => {
                photo.position = position;
                true
            }
            None => false,
        }
    }

    /// Top-most print under `point`.
    pub fn hit_test(&self, point: Point) -> Option<PhotoId> {
        self.photos
            .iter()
            .rev()
            .find(|photo| photo.contains(point))
            .map(|photo| photo.id)
    }

    /// Print currently being dragged.
    pub fn dragging(&self) -> Option<PhotoId> {
        self.drag.map(|drag| drag.photo())
    }

    /// Pointer pressed at `pointer`: grab the top-most print under it.
    pub fn begin_drag(&mut self, pointer: Point) -> Option<PhotoId> {
        let id = self.hit_test(pointer)?;
        let origin = self.get(id)?.position;
        self.drag = Some(DragSession::begin(id, origin, pointer));
        log::debug!("Started dragging print {}", id);
        Some(id)
    }

    /// Pointer moved to `pointer`: move the grabbed print, if any.
    pub fn drag_to(&mut self, pointer: Point) {
        if let Some(drag) = self.drag {
            self.update_position(drag.photo(), drag.position_for(pointer));
        }
    }

    /// Pointer released: drop the grabbed print.
    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Stopped dragging print {}", drag.photo());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::snapshot::Snapshot;
    use crate::models::photo::PhotoIdGenerator;
    use std::sync::Arc;
    use std::time::{Duration, UNIX_EPOCH};

    fn snapshot() -> Arc<Snapshot> {
        Arc::new(Snapshot::from_png(2, 2, vec![1, 2, 3]))
    }

    fn collage_with(positions: &[(f32, f32, f32)]) -> (Collage, Vec<PhotoId>) {
        let mut ids = PhotoIdGenerator::new();
        let mut collage = Collage::new();
        let mut created = Vec::new();
        for (i, &(x, y, rotation)) in positions.iter().enumerate() {
            let id = ids.next(UNIX_EPOCH + Duration::from_millis(i as u64));
            collage.add(Photo::new(id, snapshot(), Point::new(x, y), rotation));
            created.push(id);
        }
        (collage, created)
    }

    #[test]
    fn test_update_position_only_touches_target() {
        let (mut collage, ids) = collage_with(&[(0.0, 0.0, 1.5), (300.0, 0.0, -2.0)]);

        assert!(collage.update_position(ids[0], Point::new(50.0, 60.0)));

        let first = collage.get(ids[0]).unwrap();
        let second = collage.get(ids[1]).unwrap();
        assert_eq!(first.position, Point::new(50.0, 60.0));
        assert_eq!(first.rotation, 1.5);
        assert_eq!(second.position, Point::new(300.0, 0.0));
        assert_eq!(second.rotation, -2.0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut collage, _) = collage_with(&[(10.0, 10.0, 0.0)]);
        let stranger = PhotoIdGenerator::new().next(UNIX_EPOCH + Duration::from_secs(99));

        assert!(!collage.update_position(stranger, Point::new(1.0, 1.0)));
        assert_eq!(collage.photos()[0].position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_hit_test_prefers_top_print() {
        let (collage, ids) = collage_with(&[(0.0, 0.0, 0.0), (100.0, 0.0, 0.0)]);

        assert_eq!(collage.hit_test(Point::new(150.0, 100.0)), Some(ids[1]));
        assert_eq!(collage.hit_test(Point::new(50.0, 100.0)), Some(ids[0]));
        assert_eq!(collage.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_drag_follows_pointer_minus_offset() {
        let (mut collage, ids) = collage_with(&[(120.0, 380.0, 3.0)]);

        assert_eq!(collage.begin_drag(Point::new(130.0, 400.0)), Some(ids[0]));
        assert_eq!(collage.dragging(), Some(ids[0]));

        for &(px, py) in &[(131.0, 401.0), (700.0, 20.0), (-50.0, 900.0)] {
            collage.drag_to(Point::new(px, py));
            assert_eq!(collage.photos()[0].position, Point::new(px - 10.0, py - 20.0));
        }
        assert_eq!(collage.photos()[0].rotation, 3.0);

        collage.end_drag();
        assert_eq!(collage.dragging(), None);

        // Moves after release leave the print alone
        collage.drag_to(Point::new(0.0, 0.0));
        assert_eq!(collage.photos()[0].position, Point::new(-60.0, 880.0));
    }

    #[test]
    fn test_drag_only_moves_grabbed_print() {
        let (mut collage, ids) = collage_with(&[(0.0, 0.0, 0.0), (400.0, 0.0, -4.0)]);

        collage.begin_drag(Point::new(450.0, 50.0));
        collage.drag_to(Point::new(10.0, 10.0));
        collage.end_drag();

        assert_eq!(collage.get(ids[0]).unwrap().position, Point::new(0.0, 0.0));
        assert_eq!(collage.get(ids[1]).unwrap().position, Point::new(-40.0, -40.0));
    }

    #[test]
    fn test_press_on_empty_space_does_not_drag() {
        let (mut collage, _) = collage_with(&[(0.0, 0.0, 0.0)]);

        assert_eq!(collage.begin_drag(Point::new(800.0, 800.0)), None);
        collage.drag_to(Point::new(5.0, 5.0));
        assert_eq!(collage.photos()[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_repeated_drags_start_fresh() {
        let (mut collage, _) = collage_with(&[(0.0, 0.0, 0.0)]);

        collage.begin_drag(Point::new(10.0, 10.0));
        collage.drag_to(Point::new(110.0, 10.0));
        collage.end_drag();

        collage.begin_drag(Point::new(200.0, 100.0));
        collage.drag_to(Point::new(200.0, 150.0));
        collage.end_drag();

        assert_eq!(collage.photos()[0].position, Point::new(100.0, 50.0));
    }
}
