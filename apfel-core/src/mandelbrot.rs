use crate::budget::IterationBudget;
use crate::complex::Complex;
use crate::fractal::{evaluate, Fractal};

/// The Mandelbrot set: `z_{n+1} = z_n² + c` with `z₀ = c`.
///
/// The point a pixel maps to is `c` itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot;

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, c: Complex, budget: &IterationBudget) -> u32 {
        evaluate(c, budget.escape_radius_sq(), budget.max_iterations())
    }

    fn name(&self) -> &'static str {
        "Mandelbrot"
    }
}
