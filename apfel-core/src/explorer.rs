use tracing::debug;

use crate::budget::IterationBudget;
use crate::config::ExplorerConfig;
use crate::pointer::PointerState;
use crate::viewport::Viewport;

/// Immutable view of everything a render reads.
///
/// Renders never see the live [`Explorer`], so a pan that lands mid-frame
/// cannot tear the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub viewport: Viewport,
    pub budget: IterationBudget,
}

/// Session state driven by input events: where we look and how deep we iterate.
#[derive(Debug, Clone)]
pub struct Explorer {
    viewport: Viewport,
    home: Viewport,
    budget: IterationBudget,
    pointer: PointerState,
    config: ExplorerConfig,
}

impl Explorer {
    /// Start a session on the default view for a `width`×`height` canvas.
    pub fn new(config: ExplorerConfig, width: u32, height: u32) -> crate::Result<Self> {
        config.validate()?;
        let default = Viewport::default_mandelbrot(width, height);
        let viewport = Viewport::new(default.center, default.half_span(), width, height)?;
        Ok(Self {
            viewport,
            home: viewport,
            budget: config.initial_budget()?,
            pointer: PointerState::default(),
            config,
        })
    }

    /// Start a session on an explicit view, which [`Explorer::reset`] returns to.
    pub fn with_viewport(config: ExplorerConfig, viewport: Viewport) -> crate::Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(
            viewport.center,
            viewport.half_span(),
            viewport.width,
            viewport.height,
        )?;
        Ok(Self {
            viewport,
            home: viewport,
            budget: config.initial_budget()?,
            pointer: PointerState::default(),
            config,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn budget(&self) -> &IterationBudget {
        &self.budget
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Record a pointer move in canvas pixels.
    pub fn pointer_moved(&mut self, px: f64, py: f64) {
        self.pointer
            .update(px, py, self.viewport.width, self.viewport.height);
    }

    /// Apply one scroll event: zoom toward the pointer and adapt the budget.
    ///
    /// Positive `delta` zooms in and raises the iteration budget; negative
    /// zooms out and lowers it. Returns `Ok(false)` when the event changes
    /// nothing (zero or non-finite delta). On error neither the viewport nor
    /// the budget is modified.
    pub fn scrolled(&mut self, delta: f64) -> crate::Result<bool> {
        if delta == 0.0 || !delta.is_finite() {
            return Ok(false);
        }

        let factor = self.config.zoom_factor(delta);
        self.viewport
            .zoom_at(self.pointer.frac_x(), self.pointer.frac_y(), factor)?;
        self.budget.adjust(self.config.iteration_delta(delta));

        debug!(
            delta,
            factor,
            max_iterations = self.budget.max_iterations(),
            half_span = self.viewport.half_span(),
            "Scroll applied"
        );
        Ok(true)
    }

    /// Return to the startup view and budget.
    pub fn reset(&mut self) -> crate::Result<()> {
        self.budget = self.config.initial_budget()?;
        self.viewport = self.home;
        Ok(())
    }

    /// Copy the state a render needs.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            viewport: self.viewport,
            budget: self.budget,
        }
    }
}
