// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cubic-bezier timing curves for animations.

/// A timing curve through (0, 0), (x1, y1), (x2, y2), (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased value for `progress` in [0, 1]. Values outside are clamped.
    ///
    /// The result may leave [0, 1] when the control points do (overshoot).
    pub fn ease(&self, progress: f32) -> f32 {
        let x = progress.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let t = self.solve_t(x);
        sample(self.y1, self.y2, t)
    }

    /// Find the curve parameter whose x coordinate equals `x`.
    fn solve_t(&self, x: f32) -> f32 {
        // Newton-Raphson converges in a few steps for well-behaved curves
        let mut t = x;
        for _ in 0..8 {
            let error = sample(self.x1, self.x2, t) - x;
            if error.abs() < 1e-6 {
                return t;
            }
            let slope = slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        // Fall back to bisection; x(t) is monotonic for x1, x2 in [0, 1]
        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }
}

/// One coordinate of the bezier at parameter `t`.
fn sample(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn slope(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        let curve = CubicBezier::new(0.34, 1.56, 0.64, 1.0);

        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        assert_eq!(curve.ease(-0.5), 0.0);
        assert_eq!(curve.ease(3.0), 1.0);
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

        for step in 0..=10 {
            let x = step as f32 / 10.0;
            assert!((linear.ease(x) - x).abs() < 0.001, "x = {}", x);
        }
    }

    #[test]
    fn test_back_curve_overshoots() {
        let curve = CubicBezier::new(0.34, 1.56, 0.64, 1.0);
        let peak = (1..100)
            .map(|step| curve.ease(step as f32 / 100.0))
            .fold(f32::MIN, f32::max);

        assert!(peak > 1.0);
        assert!(peak < 1.2);
    }
}
