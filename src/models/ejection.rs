// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ejection and development timeline of a freshly taken print.
//!
//! The whole animation is a pure function of the time elapsed since the
//! shutter was pressed. The owner samples it on every repaint; there are no
//! timers to cancel, so dropping an [`Ejection`] stops it.

use crate::io::snapshot::Snapshot;
use crate::util::easing::CubicBezier;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Interval between development steps.
pub const DEVELOP_TICK: Duration = Duration::from_millis(50);
/// Blur radius of a fresh print, in points.
pub const INITIAL_BLUR: f32 = 20.0;
/// Ticks until blur and opacity reach their terminal values.
pub const DEVELOP_TICKS: u32 = 40;
/// Delay before the print starts sliding out of the slot.
pub const SLIDE_DELAY: Duration = Duration::from_millis(50);
/// Length of the slide out of the slot.
pub const SLIDE_DURATION: Duration = Duration::from_millis(2000);
/// Distance the print travels while sliding out.
pub const SLIDE_DISTANCE: f32 = 100.0;
/// Time from shutter press until the print joins the collage.
pub const EJECT_DURATION: Duration = Duration::from_millis(3000);

const SLIDE_CURVE: CubicBezier = CubicBezier::new(0.34, 1.56, 0.64, 1.0);

/// Lifecycle phase of a print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sliding out of the camera.
    Ejecting,
    /// Out of the camera, image still coming through.
    Developing,
    /// Ready to join the collage.
    Settled,
}

/// What a print looks like at one instant of its timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevelopmentFrame {
    pub phase: Phase,
    /// Blur radius in points, 0 when developed.
    pub blur: f32,
    /// Image opacity in [0, 1].
    pub opacity: f32,
    /// Remaining downward offset from the resting spot.
    pub slide_offset: f32,
}

impl DevelopmentFrame {
    /// Fully developed, at rest.
    pub const SETTLED: DevelopmentFrame = DevelopmentFrame {
        phase: Phase::Settled,
        blur: 0.0,
        opacity: 1.0,
        slide_offset: 0.0,
    };
}

/// Sample the timeline `elapsed` after the shutter press.
pub fn develop(elapsed: Duration) -> DevelopmentFrame {
    if elapsed >= EJECT_DURATION {
        return DevelopmentFrame::SETTLED;
    }

    let ticks = (elapsed.as_millis() / DEVELOP_TICK.as_millis()).min(DEVELOP_TICKS as u128) as u32;
    let remaining = (DEVELOP_TICKS - ticks) as f32;
    let blur = INITIAL_BLUR * remaining / DEVELOP_TICKS as f32;
    let opacity = ticks as f32 / DEVELOP_TICKS as f32;

    let slide_end = SLIDE_DELAY + SLIDE_DURATION;
    let (phase, slide_offset) = if elapsed < SLIDE_DELAY {
        (Phase::Ejecting, SLIDE_DISTANCE)
    } else if elapsed < slide_end {
        let progress = (elapsed - SLIDE_DELAY).as_secs_f32() / SLIDE_DURATION.as_secs_f32();
        (Phase::Ejecting, SLIDE_DISTANCE * (1.0 - SLIDE_CURVE.ease(progress)))
    } else {
        (Phase::Developing, 0.0)
    };

    DevelopmentFrame {
        phase,
        blur,
        opacity,
        slide_offset,
    }
}

/// The single print in flight between shutter press and collage.
#[derive(Debug, Clone)]
pub struct Ejection {
    snapshot: Arc<Snapshot>,
    started_at: Instant,
}

impl Ejection {
    pub fn new(snapshot: Arc<Snapshot>, started_at: Instant) -> Self {
        Self {
            snapshot,
            started_at,
        }
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    #[cfg(test)]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Timeline sample at `now`. Instants before the start count as the start.
    pub fn frame_at(&self, now: Instant) -> DevelopmentFrame {
        develop(now.saturating_duration_since(self.started_at))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.frame_at(now).phase == Phase::Settled
    }
}
