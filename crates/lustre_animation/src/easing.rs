//! Easing functions for tweens
//!
//! Every variant is a pure map from `[0, 1]` to `[0, 1]` with exact endpoints.

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    CubicBezier(f32, f32, f32, f32),
    /// Caller-supplied curve
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => power_in(t, 2),
            Easing::EaseOutQuad => power_out(t, 2),
            Easing::EaseInOutQuad => power_in_out(t, 2),
            Easing::EaseInCubic => power_in(t, 3),
            Easing::EaseOutCubic => power_out(t, 3),
            Easing::EaseInOutCubic => power_in_out(t, 3),
            Easing::EaseInQuart => power_in(t, 4),
            Easing::EaseOutQuart => power_out(t, 4),
            Easing::EaseInOutQuart => power_in_out(t, 4),
            Easing::CubicBezier(x1, y1, x2, y2) => Bezier::new(x1, y1, x2, y2).ease(t),
            Easing::Custom(curve) => curve(t).clamp(0.0, 1.0),
        }
    }
}

fn power_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

fn power_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

// Mirrored halves; both meet at (0.5, 0.5)
fn power_in_out(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        power_in(2.0 * t, n) / 2.0
    } else {
        1.0 - power_in(2.0 - 2.0 * t, n) / 2.0
    }
}

/// CSS-style cubic bezier through (0, 0) and (1, 1), in polynomial form
struct Bezier {
    x: [f64; 3],
    y: [f64; 3],
}

impl Bezier {
    const ITERATIONS: usize = 40;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        // x control points outside [0, 1] would make x(s) non-monotonic
        let x1 = x1.clamp(0.0, 1.0);
        let x2 = x2.clamp(0.0, 1.0);
        Self {
            x: Self::coefficients(x1 as f64, x2 as f64),
            y: Self::coefficients(y1 as f64, y2 as f64),
        }
    }

    fn coefficients(p1: f64, p2: f64) -> [f64; 3] {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        [1.0 - c - b, b, c]
    }

    fn eval([a, b, c]: [f64; 3], s: f64) -> f64 {
        ((a * s + b) * s + c) * s
    }

    fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        // Bisection on the curve parameter until x(s) == t
        let target = t as f64;
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..Self::ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if Self::eval(self.x, mid) < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self::eval(self.y, (lo + hi) / 2.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn ease_in_out_cubic_matches_formula() {
        let e = Easing::EaseInOutCubic;
        assert!((e.apply(0.25) - 4.0 * 0.25f32.powi(3)).abs() < 1e-6);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.75) - (1.0 - 0.5f32.powi(3) / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn linear_bezier_is_identity() {
        let e = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1_f32, 0.3, 0.5, 0.9] {
            assert!((e.apply(t) - t).abs() < 1e-4, "at {t}");
        }
    }

    #[test]
    fn custom_curve_is_clamped() {
        let overshoot = Easing::Custom(|t| t * 2.0);
        assert_eq!(overshoot.apply(0.75), 1.0);
    }
}
