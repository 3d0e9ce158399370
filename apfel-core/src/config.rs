use serde::{Deserialize, Serialize};

use crate::budget::IterationBudget;
use crate::error::CoreError;

/// Tunables for how input events drive the view.
///
/// Every field has a serde default so partial config files still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Iteration cap at startup.
    #[serde(default = "default_max_iterations")]
    pub default_max_iterations: u32,

    /// Squared bailout radius used by the escape-time loop.
    #[serde(default = "default_escape_radius_sq")]
    pub escape_radius_sq: f64,

    /// Zoom factor per unit of scroll delta: `factor = 1 - delta * zoom_speed`.
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f64,

    /// Iteration budget change per scroll tick.
    #[serde(default = "default_iteration_step")]
    pub iteration_step: f64,

    /// Scroll delta reported for one wheel notch.
    #[serde(default = "default_scroll_tick")]
    pub scroll_tick: f64,

    /// Lower clamp for the per-event zoom factor.
    #[serde(default = "default_min_zoom_factor")]
    pub min_zoom_factor: f64,

    /// Upper clamp for the per-event zoom factor.
    #[serde(default = "default_max_zoom_factor")]
    pub max_zoom_factor: f64,
}

fn default_max_iterations() -> u32 {
    IterationBudget::DEFAULT_MAX_ITERATIONS
}
fn default_escape_radius_sq() -> f64 {
    IterationBudget::DEFAULT_ESCAPE_RADIUS_SQ
}
fn default_zoom_speed() -> f64 {
    0.001
}
fn default_iteration_step() -> f64 {
    0.5
}
fn default_scroll_tick() -> f64 {
    40.0
}
fn default_min_zoom_factor() -> f64 {
    0.1
}
fn default_max_zoom_factor() -> f64 {
    10.0
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: default_max_iterations(),
            escape_radius_sq: default_escape_radius_sq(),
            zoom_speed: default_zoom_speed(),
            iteration_step: default_iteration_step(),
            scroll_tick: default_scroll_tick(),
            min_zoom_factor: default_min_zoom_factor(),
            max_zoom_factor: default_max_zoom_factor(),
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |reason: String| Err(CoreError::InvalidConfig { reason });

        if !(self.zoom_speed > 0.0 && self.zoom_speed.is_finite()) {
            return fail(format!("zoom_speed must be positive, got {}", self.zoom_speed));
        }
        if !self.iteration_step.is_finite() || self.iteration_step < 0.0 {
            return fail(format!(
                "iteration_step must be >= 0, got {}",
                self.iteration_step
            ));
        }
        if !(self.scroll_tick > 0.0 && self.scroll_tick.is_finite()) {
            return fail(format!("scroll_tick must be positive, got {}", self.scroll_tick));
        }
        if !(self.min_zoom_factor > 0.0
            && self.min_zoom_factor < 1.0
            && self.max_zoom_factor > 1.0
            && self.max_zoom_factor.is_finite())
        {
            return fail(format!(
                "zoom factor clamp must satisfy 0 < min < 1 < max, got [{}, {}]",
                self.min_zoom_factor, self.max_zoom_factor
            ));
        }
        IterationBudget::new(self.default_max_iterations, self.escape_radius_sq)?;
        Ok(())
    }

    /// The iteration budget a fresh session starts with.
    pub fn initial_budget(&self) -> crate::Result<IterationBudget> {
        IterationBudget::new(self.default_max_iterations, self.escape_radius_sq)
    }

    /// Zoom factor for a scroll delta, clamped so it is always positive.
    pub fn zoom_factor(&self, delta: f64) -> f64 {
        (1.0 - delta * self.zoom_speed).clamp(self.min_zoom_factor, self.max_zoom_factor)
    }

    /// Iteration budget change for a scroll delta; positive when zooming in.
    pub fn iteration_delta(&self, delta: f64) -> f64 {
        self.iteration_step * delta / self.scroll_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ExplorerConfig::default().validate().is_ok());
    }

    #[test]
    fn one_notch_steps_half_an_iteration() {
        let cfg = ExplorerConfig::default();
        assert!((cfg.iteration_delta(40.0) - 0.5).abs() < 1e-12);
        assert!((cfg.iteration_delta(-40.0) + 0.5).abs() < 1e-12);
        assert!((cfg.zoom_factor(40.0) - 0.96).abs() < 1e-12);
        assert!((cfg.zoom_factor(-40.0) - 1.04).abs() < 1e-12);
    }

    #[test]
    fn huge_deltas_are_clamped_positive() {
        let cfg = ExplorerConfig::default();
        assert_eq!(cfg.zoom_factor(5_000.0), 0.1);
        assert_eq!(cfg.zoom_factor(-50_000.0), 10.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: ExplorerConfig = serde_json::from_str(r#"{ "zoom_speed": 0.002 }"#).unwrap();
        assert_eq!(cfg.zoom_speed, 0.002);
        assert_eq!(cfg.default_max_iterations, 100);
        assert_eq!(cfg.escape_radius_sq, 1000.0);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            ExplorerConfig {
                zoom_speed: 0.0,
                ..Default::default()
            },
            ExplorerConfig {
                scroll_tick: -1.0,
                ..Default::default()
            },
            ExplorerConfig {
                min_zoom_factor: 0.0,
                ..Default::default()
            },
            ExplorerConfig {
                max_zoom_factor: 0.9,
                ..Default::default()
            },
            ExplorerConfig {
                default_max_iterations: 0,
                ..Default::default()
            },
            ExplorerConfig {
                escape_radius_sq: -1.0,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
    }
}
