// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo data structures.
//!
//! This module defines the settled print that lives on the collage, its
//! identifier, and the window-space point type shared by the models.

use crate::io::snapshot::Snapshot;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Width of a print card in points.
pub const PRINT_WIDTH: f32 = 220.0;
/// Margin around the image area (top, left, right).
pub const PRINT_MARGIN: f32 = 12.0;
/// Thicker bottom margin of the card.
pub const PRINT_BOTTOM_MARGIN: f32 = 48.0;
/// Side of the square image area.
pub const PRINT_IMAGE_SIDE: f32 = PRINT_WIDTH - 2.0 * PRINT_MARGIN;
/// Height of a print card in points.
pub const PRINT_HEIGHT: f32 = PRINT_MARGIN + PRINT_IMAGE_SIDE + PRINT_BOTTOM_MARGIN;

/// A 2D point in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`.
    pub fn offset_to(self, other: Point) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Move the point by `(dx, dy)`.
    pub fn translate(self, (dx, dy): (f32, f32)) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Unique photo identifier, derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(u64);

impl PhotoId {
    #[cfg(test)]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out creation-time ids that stay unique even when several photos
/// are created within the same millisecond or the clock steps backwards.
#[derive(Debug, Default)]
pub struct PhotoIdGenerator {
    last: Option<u64>,
}

impl PhotoIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a photo created at `now`.
    pub fn next(&mut self, now: SystemTime) -> PhotoId {
        let millis = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        PhotoId(id)
    }
}

/// A developed print on the collage.
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: PhotoId,
    pub snapshot: Arc<Snapshot>,
    /// Top-left corner of the unrotated card.
    pub position: Point,
    /// Tilt in degrees.
    pub rotation: f32,
}

impl Photo {
    pub fn new(id: PhotoId, snapshot: Arc<Snapshot>, position: Point, rotation: f32) -> Self {
        Self {
            id,
            snapshot,
            position,
            rotation,
        }
    }

    /// Check whether the rotated card covers `point`.
    pub fn contains(&self, point: Point) -> bool {
        crate::util::geometry::rotated_rect_contains(
            self.position,
            PRINT_WIDTH,
            PRINT_HEIGHT,
            self.rotation,
            point,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_ids_follow_the_clock() {
        let mut ids = PhotoIdGenerator::new();
        let t = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);

        assert_eq!(ids.next(t).as_u64(), 1_700_000_000_000);
        assert_eq!(ids.next(t + Duration::from_millis(40)).as_u64(), 1_700_000_000_040);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = PhotoIdGenerator::new();
        let t = UNIX_EPOCH + Duration::from_millis(5_000);

        let a = ids.next(t);
        let b = ids.next(t);
        let c = ids.next(t - Duration::from_millis(3));

        assert!(a < b && b < c);
    }

    #[test]
    fn test_print_dimensions() {
        assert_eq!(PRINT_IMAGE_SIDE, 196.0);
        assert_eq!(PRINT_HEIGHT, 256.0);
    }

    #[test]
    fn test_point_offset_roundtrip() {
        let origin = Point::new(120.0, 380.0);
        let pointer = Point::new(150.5, 400.0);

        let offset = origin.offset_to(pointer);
        assert_eq!(offset, (30.5, 20.0));
        assert_eq!(pointer.translate((-offset.0, -offset.1)), origin);
    }
}
