use crate::budget::IterationBudget;
use crate::complex::Complex;

/// Iterate `z ← z² + c` from `z0` and count the steps taken before escape.
///
/// The magnitude is checked *before* each step, against the squared escape
/// radius (no square root in the loop). Returns `0` if `z0` already lies
/// outside the radius and `max_iterations` if the orbit never escapes.
#[inline]
pub fn evaluate_orbit(z0: Complex, c: Complex, escape_radius_sq: f64, max_iterations: u32) -> u32 {
    debug_assert!(escape_radius_sq > 0.0, "escape radius must be positive");

    let (mut x, mut y) = (z0.re, z0.im);
    let mut x2 = x * x;
    let mut y2 = y * y;

    let mut n = 0;
    while n < max_iterations && x2 + y2 <= escape_radius_sq {
        y = 2.0 * x * y + c.im;
        x = x2 - y2 + c.re;
        x2 = x * x;
        y2 = y * y;
        n += 1;
    }
    n
}

/// Mandelbrot escape count for `c`: the orbit starts at `z0 = c`.
#[inline]
pub fn evaluate(c: Complex, escape_radius_sq: f64, max_iterations: u32) -> u32 {
    evaluate_orbit(c, c, escape_radius_sq, max_iterations)
}

/// Trait implemented by all fractal types.
///
/// Designed for **static dispatch**: the renderer is generic over
/// `F: Fractal` so the iteration loop is inlined into the pixel loop.
pub trait Fractal {
    /// Escape count for the point a pixel maps to.
    fn iterate(&self, point: Complex, budget: &IterationBudget) -> u32;

    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    const R2: f64 = IterationBudget::DEFAULT_ESCAPE_RADIUS_SQ;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(evaluate(Complex::ZERO, R2, 100), 100);
        assert_eq!(evaluate(Complex::ZERO, 4.0, 7), 7);
    }

    #[test]
    fn two_escapes_after_two_steps() {
        // |2|² = 4 → z₁ = 6 (36) → z₂ = 38 (1444 > 1000).
        assert_eq!(evaluate(Complex::new(2.0, 0.0), R2, 100), 2);
    }

    #[test]
    fn three_escapes_after_two_steps() {
        // |3|² = 9 → z₁ = 12 (144) → z₂ = 147 (21609 > 1000).
        assert_eq!(evaluate(Complex::new(3.0, 0.0), R2, 100), 2);
    }

    #[test]
    fn start_outside_radius_returns_zero() {
        assert_eq!(evaluate(Complex::new(40.0, 0.0), R2, 100), 0);
        assert_eq!(evaluate(Complex::new(0.0, -31.7), R2, 100), 0);
    }

    #[test]
    fn cap_bounds_the_count() {
        let points = [
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
            Complex::new(0.26, 0.0),
            Complex::new(-1.0, 0.0),
        ];
        for max in [1, 2, 10, 100] {
            for &c in &points {
                let n = evaluate(c, R2, max);
                assert!(n <= max, "{c} returned {n} > {max}");
            }
        }
    }

    #[test]
    fn period_two_point_is_bounded() {
        // c = -1: -1 → 0 → -1 → …
        assert_eq!(evaluate(Complex::new(-1.0, 0.0), R2, 250), 250);
    }

    #[test]
    fn julia_orbit_uses_separate_start() {
        // c = 0: z ← z², so |z0| < 1 is bounded and |z0| > 1 escapes.
        assert_eq!(evaluate_orbit(Complex::new(0.5, 0.5), Complex::ZERO, R2, 64), 64);
        assert!(evaluate_orbit(Complex::new(1.5, 0.0), Complex::ZERO, R2, 64) < 64);
    }

    #[test]
    fn counts_are_non_increasing_along_positive_real_axis() {
        let mut prev = u32::MAX;
        for i in 0..200 {
            let c = Complex::new(0.26 + i as f64 * 0.01, 0.0);
            let n = evaluate(c, R2, 100);
            assert!(n <= prev, "count rose at {c}: {prev} → {n}");
            prev = n;
        }
    }
}
