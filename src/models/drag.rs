// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer drag tracking for prints.

use super::photo::{PhotoId, Point};

/// An active drag of one print.
///
/// Exists from pointer-down on the print until pointer-up anywhere in the
/// window. While it exists every pointer move is routed to the print, no
/// matter where the pointer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    photo: PhotoId,
    /// Pointer position minus print origin at grab time.
    grab_offset: (f32, f32),
}

impl DragSession {
    /// Grab `photo` whose origin is `origin` with the pointer at `pointer`.
    pub fn begin(photo: PhotoId, origin: Point, pointer: Point) -> Self {
        Self {
            photo,
            grab_offset: origin.offset_to(pointer),
        }
    }

    pub fn photo(&self) -> PhotoId {
        self.photo
    }

    #[cfg(test)]
    pub fn grab_offset(&self) -> (f32, f32) {
        self.grab_offset
    }

    /// Print origin for a pointer at `pointer`.
    pub fn position_for(&self, pointer: Point) -> Point {
        pointer.translate((-self.grab_offset.0, -self.grab_offset.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::photo::PhotoIdGenerator;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_offset_is_fixed_at_grab() {
        let id = PhotoIdGenerator::new().next(UNIX_EPOCH);
        let drag = DragSession::begin(id, Point::new(120.0, 380.0), Point::new(200.0, 400.0));

        assert_eq!(drag.grab_offset(), (80.0, 20.0));
        assert_eq!(drag.position_for(Point::new(200.0, 400.0)), Point::new(120.0, 380.0));
        assert_eq!(drag.position_for(Point::new(-10.0, 5.0)), Point::new(-90.0, -15.0));
        assert_eq!(drag.position_for(Point::new(1000.0, 900.0)), Point::new(920.0, 880.0));
    }
}
