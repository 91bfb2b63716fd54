/// Cubic Bezier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Ease used for growing radii and scales.
pub const SCALE_EASE: CubicBezier = CubicBezier::new(0.0, 0.0, 0.52, 1.0);
/// Ease used for fades and the nearby transition.
pub const ALPHA_EASE: CubicBezier = CubicBezier::new(0.33, 0.0, 0.67, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECT_ITERATIONS: usize = 32;
const EPSILON: f64 = 1e-7;

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coord(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Finds the curve parameter whose x equals `x`. x(t) is monotone for
    /// control points in [0, 1].
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = Self::slope(t, self.x1, self.x2);
            if d.abs() < EPSILON {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECT_ITERATIONS {
            let cx = Self::coord(t, self.x1, self.x2);
            if (cx - x).abs() < EPSILON {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn ease(&self, progress: f64) -> f64 {
        let x = progress.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::coord(self.solve_t(x), self.y1, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for curve in [SCALE_EASE, ALPHA_EASE] {
            assert_eq!(curve.ease(0.0), 0.0);
            assert_eq!(curve.ease(1.0), 1.0);
            assert_eq!(curve.ease(-3.0), 0.0);
            assert_eq!(curve.ease(7.0), 1.0);
        }
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 1..10 {
            let x = i as f64 / 10.0;
            assert!((linear.ease(x) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_symmetric_alpha_ease() {
        assert!((ALPHA_EASE.ease(0.5) - 0.5).abs() < 1e-6);
        let a = ALPHA_EASE.ease(0.25);
        let b = ALPHA_EASE.ease(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_ease_is_monotone_ease_out() {
        let mut last = 0.0;
        for i in 1..=100 {
            let x = i as f64 / 100.0;
            let y = SCALE_EASE.ease(x);
            assert!(y >= last);
            last = y;
        }
        assert!(SCALE_EASE.ease(0.5) > 0.5);
    }
}
