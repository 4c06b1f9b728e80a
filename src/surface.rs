// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Capture surface state.
//!
//! Owns the collage and the single print in flight. The shutter is only
//! enabled while the feed is live and nothing is being ejected, which is
//! what keeps at most one ejection alive at a time.

use crate::io::snapshot::Snapshot;
use crate::models::collage::Collage;
use crate::models::ejection::Ejection;
use crate::models::photo::{Photo, PhotoId, PhotoIdGenerator, Point};
use rand::Rng;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Largest tilt of a settled print, in degrees.
pub const MAX_TILT: f32 = 5.0;
/// Where settled prints land, measured from the window's left edge.
pub const LANDING_X: f32 = 120.0;
/// Where settled prints land, measured up from the window's bottom edge.
pub const LANDING_FROM_BOTTOM: f32 = 420.0;

/// Initial spot of a newly settled print in a window `window_height` tall.
pub fn landing_position(window_height: f32) -> Point {
    Point::new(LANDING_X, window_height - LANDING_FROM_BOTTOM)
}

#[derive(Debug, Default)]
pub struct CaptureSurface {
    collage: Collage,
    ejecting: Option<Ejection>,
    ids: PhotoIdGenerator,
}

impl CaptureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collage(&self) -> &Collage {
        &self.collage
    }

    pub fn collage_mut(&mut self) -> &mut Collage {
        &mut self.collage
    }

    /// The print currently sliding out, if any.
    pub fn ejecting(&self) -> Option<&Ejection> {
        self.ejecting.as_ref()
    }

    /// Check whether the shutter can fire.
    pub fn shutter_enabled(&self, stream_live: bool) -> bool {
        stream_live && self.ejecting.is_none()
    }

    /// Fire the shutter with `snapshot` as the new print's image.
    ///
    /// Returns `false` and changes nothing when the shutter is disabled.
    pub fn press_shutter(&mut self, stream_live: bool, snapshot: Arc<Snapshot>, now: Instant) -> bool {
        if !self.shutter_enabled(stream_live) {
            log::debug!("Shutter pressed while disabled, ignoring");
            return false;
        }
        log::info!(
            "Captured {}x{} print ({} bytes)",
            snapshot.width(),
            snapshot.height(),
            snapshot.png().len()
        );
        self.ejecting = Some(Ejection::new(snapshot, now));
        true
    }

    /// Move the in-flight print to the collage once its timeline has run out.
    ///
    /// Returns the id of the new settled print.
    pub fn advance<R: Rng>(&mut self, now: Instant, landing: Point, rng: &mut R) -> Option<PhotoId> {
        if !self.ejecting.as_ref()?.is_complete(now) {
            return None;
        }
        let ejection = self.ejecting.take()?;

        let id = self.ids.next(SystemTime::now());
        let rotation = rng.gen_range(-MAX_TILT..MAX_TILT);
        self.collage.add(Photo::new(id, ejection.snapshot().clone(), landing, rotation));
        Some(id)
    }

    /// Drop the in-flight print without adding it to the collage.
    pub fn discard_ejection(&mut self) {
        if self.ejecting.take().is_some() {
            log::debug!("Discarded print in flight");
        }
    }
}
