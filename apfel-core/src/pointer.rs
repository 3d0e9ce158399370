/// Last known pointer position as a fraction of the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    frac_x: f64,
    frac_y: f64,
}

impl PointerState {
    /// Record a pointer position given in pixels on a `width`×`height` canvas.
    ///
    /// Positions outside the canvas are clamped onto its edge.
    pub fn update(&mut self, px: f64, py: f64, width: u32, height: u32) {
        self.frac_x = normalize(px, width);
        self.frac_y = normalize(py, height);
    }

    #[inline]
    pub fn frac_x(&self) -> f64 {
        self.frac_x
    }

    #[inline]
    pub fn frac_y(&self) -> f64 {
        self.frac_y
    }
}

fn normalize(p: f64, extent: u32) -> f64 {
    if extent == 0 || !p.is_finite() {
        return 0.5;
    }
    (p / extent as f64).clamp(0.0, 1.0)
}
