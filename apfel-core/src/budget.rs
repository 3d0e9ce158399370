use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;

/// How deep the escape-time loop may iterate, and when an orbit has escaped.
///
/// `max_iterations` is a real-valued counter so fractional per-scroll steps
/// accumulate; it is rounded to the nearest integer whenever it is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationBudget {
    max_iterations: f64,
    escape_radius_sq: f64,
}

impl IterationBudget {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
    pub const DEFAULT_ESCAPE_RADIUS_SQ: f64 = 1000.0;

    pub fn new(max_iterations: u32, escape_radius_sq: f64) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if escape_radius_sq <= 0.0 || !escape_radius_sq.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius_sq));
        }
        Ok(Self {
            max_iterations: max_iterations as f64,
            escape_radius_sq,
        })
    }

    /// The iteration cap the engine runs with: the counter rounded, never below 1.
    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations.round().clamp(1.0, u32::MAX as f64) as u32
    }

    /// The unrounded counter.
    pub fn raw_max_iterations(&self) -> f64 {
        self.max_iterations
    }

    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.escape_radius_sq
    }

    /// Add `delta` to the counter (negative on zoom-out), clamping at 1.
    ///
    /// Repeated zoom-out routinely pushes the counter toward zero, so this
    /// clamps instead of failing.
    pub fn adjust(&mut self, delta: f64) {
        if !delta.is_finite() {
            warn!(delta, "Ignoring non-finite iteration budget change");
            return;
        }
        let next = self.max_iterations + delta;
        if next < 1.0 {
            warn!(requested = next, "Iteration budget clamped to 1");
            self.max_iterations = 1.0;
        } else {
            self.max_iterations = next.min(u32::MAX as f64);
        }
    }

    /// Re-check the invariants; used before a render is dispatched.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_iterations() < 1 {
            return Err(CoreError::InvalidMaxIterations(self.max_iterations()));
        }
        if self.escape_radius_sq <= 0.0 || !self.escape_radius_sq.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(self.escape_radius_sq));
        }
        Ok(())
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS as f64,
            escape_radius_sq: Self::DEFAULT_ESCAPE_RADIUS_SQ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget() {
        let b = IterationBudget::default();
        assert_eq!(b.max_iterations(), 100);
        assert_eq!(b.escape_radius_sq(), 1000.0);
    }

    #[test]
    fn half_steps_round_to_nearest() {
        let mut b = IterationBudget::default();
        b.adjust(0.5);
        // 100.5 rounds away from zero.
        assert_eq!(b.max_iterations(), 101);
        b.adjust(0.5);
        assert_eq!(b.max_iterations(), 101);
        b.adjust(-1.25);
        assert_eq!(b.max_iterations(), 100);
        assert!((b.raw_max_iterations() - 99.75).abs() < 1e-12);
    }

    #[test]
    fn zoom_out_clamps_at_one() {
        let mut b = IterationBudget::new(3, 1000.0).unwrap();
        for _ in 0..20 {
            b.adjust(-0.5);
        }
        assert_eq!(b.max_iterations(), 1);
        assert_eq!(b.raw_max_iterations(), 1.0);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn non_finite_change_is_ignored() {
        let mut b = IterationBudget::default();
        b.adjust(f64::NAN);
        b.adjust(f64::NEG_INFINITY);
        assert_eq!(b, IterationBudget::default());
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            IterationBudget::new(0, 1000.0),
            Err(CoreError::InvalidMaxIterations(0))
        );
        assert!(IterationBudget::new(10, 0.0).is_err());
        assert!(IterationBudget::new(10, -4.0).is_err());
        assert!(IterationBudget::new(10, f64::NAN).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let b = IterationBudget::new(250, 4.0).unwrap();
        let json = serde_json::to_string(&b).unwrap();
        let back: IterationBudget = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
