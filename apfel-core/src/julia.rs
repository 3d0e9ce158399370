use crate::budget::IterationBudget;
use crate::complex::Complex;
use crate::fractal::{evaluate_orbit, Fractal};

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone, Copy)]
pub struct Julia {
    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }

    /// A visually interesting default: `c = -0.7 + 0.27015i`.
    pub fn default_c() -> Complex {
        Complex::new(-0.7, 0.27015)
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c())
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, z0: Complex, budget: &IterationBudget) -> u32 {
        evaluate_orbit(z0, self.c, budget.escape_radius_sq(), budget.max_iterations())
    }

    fn name(&self) -> &'static str {
        "Julia"
    }
}
