//! Timing curves

/// Timing curve of an animation, expressed as a cubic Bézier from (0,0) to (1,1)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TimingCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInEaseOut,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl TimingCurve {
    /// Control points of the curve
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        match *self {
            TimingCurve::Linear => (0.0, 0.0, 1.0, 1.0),
            TimingCurve::EaseIn => (0.42, 0.0, 1.0, 1.0),
            TimingCurve::EaseOut => (0.0, 0.0, 0.58, 1.0),
            TimingCurve::EaseInEaseOut => (0.42, 0.0, 0.58, 1.0),
            TimingCurve::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        }
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if matches!(self, TimingCurve::Linear) || t == 0.0 || t == 1.0 {
            return t;
        }

        let (x1, y1, x2, y2) = self.control_points();
        let x1 = x1.clamp(0.0, 1.0);
        let x2 = x2.clamp(0.0, 1.0);
        let s = solve_parameter(t, x1, x2);
        bezier(s, y1, y2)
    }
}

fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    // Newton did not converge; x(s) is monotonic on [0, 1] so bisect.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn endpoints_are_fixed() {
        for curve in [
            TimingCurve::Linear,
            TimingCurve::EaseIn,
            TimingCurve::EaseOut,
            TimingCurve::EaseInEaseOut,
        ] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(-2.0), 0.0);
            assert_eq!(curve.apply(3.0), 1.0);
        }
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_starts_fast() {
        assert!(TimingCurve::EaseIn.apply(0.25) < 0.25);
        assert!(TimingCurve::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let curve = TimingCurve::EaseInEaseOut;
        assert!(close(curve.apply(0.5), 0.5));
        assert!(close(curve.apply(0.2), 1.0 - curve.apply(0.8)));
    }

    #[test]
    fn eased_progress_is_monotonic() {
        let curve = TimingCurve::EaseOut;
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = curve.apply(step as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn nan_progress_is_start() {
        assert_eq!(TimingCurve::EaseIn.apply(f64::NAN), 0.0);
    }
}
