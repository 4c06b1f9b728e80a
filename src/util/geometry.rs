// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Prints are positioned by the top-left corner of their unrotated card and
//! rotated about their center, so hit-testing has to undo that rotation.

use crate::models::photo::Point;

/// Rotate `point` around `center` by `degrees` (clockwise in screen space,
/// where y grows downwards).
pub fn rotate_about(point: Point, center: Point, degrees: f32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point {
        x: center.x + dx * cos - dy * sin,
        y: center.y + dx * sin + dy * cos,
    }
}

/// Check whether `pointer` lies inside a `width` x `height` rectangle whose
/// unrotated top-left corner is `origin`, rotated by `degrees` about its center.
pub fn rotated_rect_contains(
    origin: Point,
    width: f32,
    height: f32,
    degrees: f32,
    pointer: Point,
) -> bool {
    let center = Point::new(origin.x + width / 2.0, origin.y + height / 2.0);
    let local = rotate_about(pointer, center, -degrees);
    local.x >= origin.x
        && local.x <= origin.x + width
        && local.y >= origin.y
        && local.y <= origin.y + height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let center = Point::new(10.0, 10.0);
        let rotated = rotate_about(Point::new(20.0, 10.0), center, 90.0);

        assert!((rotated.x - 10.0).abs() < 0.0001);
        assert!((rotated.y - 20.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotate_roundtrip() {
        let center = Point::new(110.0, 128.0);
        let point = Point::new(37.5, 260.0);

        let there = rotate_about(point, center, 4.2);
        let back = rotate_about(there, center, -4.2);

        assert!((back.x - point.x).abs() < 0.001);
        assert!((back.y - point.y).abs() < 0.001);
    }

    #[test]
    fn test_unrotated_rect_edges() {
        let origin = Point::new(100.0, 50.0);

        assert!(rotated_rect_contains(origin, 220.0, 256.0, 0.0, Point::new(100.0, 50.0)));
        assert!(rotated_rect_contains(origin, 220.0, 256.0, 0.0, Point::new(320.0, 306.0)));
        assert!(!rotated_rect_contains(origin, 220.0, 256.0, 0.0, Point::new(99.0, 60.0)));
        assert!(!rotated_rect_contains(origin, 220.0, 256.0, 0.0, Point::new(200.0, 307.0)));
    }

    #[test]
    fn test_rotation_moves_corners() {
        let origin = Point::new(0.0, 0.0);

        // The top-left corner swings out of the rotated card...
        assert!(!rotated_rect_contains(origin, 100.0, 100.0, 45.0, Point::new(1.0, 1.0)));
        // ...and a corner now covers a point above the original top edge.
        assert!(rotated_rect_contains(origin, 100.0, 100.0, 45.0, Point::new(50.0, 50.0)));
        assert!(rotated_rect_contains(origin, 100.0, 100.0, 45.0, Point::new(50.0, -15.0)));
    }
}
