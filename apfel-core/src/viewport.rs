use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Axis-aligned region of the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
}

/// Defines the visible region of the complex plane.
///
/// The region is centred on `center` and reaches `half_span` units to the
/// left and right along the real axis. The imaginary half-span follows from
/// the pixel aspect ratio (`height / width`), so pixels stay square.
///
/// Pixel `(0, 0)` maps to `(re_min, im_min)` and pixel `(width, height)` to
/// `(re_max, im_max)`: the imaginary part grows with pixel-y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Centre of the viewport in the complex plane.
    pub center: Complex,

    /// Distance from the centre to the left/right edge, in complex-plane units.
    half_span: f64,

    /// Viewport width in pixels.
    pub width: u32,

    /// Viewport height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Canvas side length of the reference explorer window.
    pub const DEFAULT_SIZE: u32 = 800;

    /// Startup view: real ∈ [-2.5, 1.5], imaginary ∈ [-2, 2] on a square canvas.
    pub fn default_mandelbrot(width: u32, height: u32) -> Self {
        Self {
            center: Complex::new(-0.5, 0.0),
            half_span: 2.0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Default view for Julia sets, centred on the origin with `|z| <= 2` visible.
    pub fn default_julia(width: u32, height: u32) -> Self {
        Self {
            center: Complex::ZERO,
            half_span: 2.0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Create a viewport with explicit parameters.
    pub fn new(center: Complex, half_span: f64, width: u32, height: u32) -> crate::Result<Self> {
        let vp = Self {
            center,
            half_span,
            width,
            height,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// Check the invariants [`Viewport::new`] enforces.
    ///
    /// `center`, `width` and `height` are public, so a viewport edited in
    /// place must be re-checked before it is rendered.
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |reason: String| Err(CoreError::InvalidViewport { reason });

        if self.width == 0 || self.height == 0 {
            return fail(format!(
                "dimensions must be > 0, got {}×{}",
                self.width, self.height
            ));
        }
        if self.half_span <= 0.0 || !self.half_span.is_finite() {
            return fail(format!(
                "half-span must be positive and finite, got {}",
                self.half_span
            ));
        }
        if !self.center.re.is_finite() || !self.center.im.is_finite() {
            return fail(format!("center must be finite, got {}", self.center));
        }
        if !spans_resolve(self.center, self.half_span, self.aspect()) {
            let b = self.bounds();
            return fail(format!(
                "bounds collapse at this precision: [{}, {}] × [{}, {}]",
                b.re_min, b.re_max, b.im_min, b.im_max
            ));
        }
        Ok(())
    }

    /// Build a viewport from absolute real-axis bounds.
    ///
    /// The imaginary range is centred on `(im_min + im_max) / 2`; its extent
    /// is derived from the aspect ratio, so only its midpoint is used.
    pub fn from_bounds(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        width: u32,
        height: u32,
    ) -> crate::Result<Self> {
        if !(re_min < re_max) || !(im_min < im_max) {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "bounds must satisfy min < max, got [{re_min}, {re_max}] × [{im_min}, {im_max}]"
                ),
            });
        }
        let center = Complex::new((re_min + re_max) / 2.0, (im_min + im_max) / 2.0);
        Self::new(center, (re_max - re_min) / 2.0, width, height)
    }

    /// Half the real-axis extent of the viewport.
    #[inline]
    pub fn half_span(&self) -> f64 {
        self.half_span
    }

    /// Half the imaginary-axis extent of the viewport.
    #[inline]
    pub fn half_span_im(&self) -> f64 {
        self.half_span * self.aspect()
    }

    /// `height / width`: scales the real half-span into the imaginary one.
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    /// The visible region as absolute bounds.
    pub fn bounds(&self) -> Bounds {
        let hs_im = self.half_span_im();
        Bounds {
            re_min: self.center.re - self.half_span,
            re_max: self.center.re + self.half_span,
            im_min: self.center.im - hs_im,
            im_max: self.center.im + hs_im,
        }
    }

    /// Map a (possibly fractional) pixel coordinate to the complex plane.
    ///
    /// Straight linear interpolation between the bounds; `(width, height)`
    /// is the far corner, one past the last pixel.
    #[inline]
    pub fn to_complex(&self, px: f64, py: f64) -> Complex {
        let b = self.bounds();
        Complex::new(
            b.re_min + (b.re_max - b.re_min) * px / self.width as f64,
            b.im_min + (b.im_max - b.im_min) * py / self.height as f64,
        )
    }

    /// Integer-pixel shorthand for [`to_complex`](Self::to_complex).
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> Complex {
        self.to_complex(px as f64, py as f64)
    }

    /// Inverse of [`to_complex`](Self::to_complex).
    pub fn to_pixel(&self, c: Complex) -> (f64, f64) {
        let b = self.bounds();
        (
            (c.re - b.re_min) * self.width as f64 / (b.re_max - b.re_min),
            (c.im - b.im_min) * self.height as f64 / (b.im_max - b.im_min),
        )
    }

    /// Complex-plane offset from the centre to the point at the given canvas
    /// fraction, measured with the current half-span.
    #[inline]
    fn offset_at(&self, frac_x: f64, frac_y: f64) -> Complex {
        Complex::new(
            (2.0 * frac_x - 1.0) * self.half_span,
            (2.0 * frac_y - 1.0) * self.half_span_im(),
        )
    }

    /// Shift the centre toward (`amount > 0`) or away from (`amount < 0`)
    /// the point under the pointer by `amount` times its offset from the
    /// centre. A pointer at `(0.5, 0.5)` never moves the view.
    pub fn pan_by(&mut self, frac_x: f64, frac_y: f64, amount: f64) {
        let delta = self.offset_at(frac_x, frac_y) * amount;
        self.center = self.center + delta;
    }

    /// Scale the half-span by `factor` (`< 1` zooms in, `> 1` zooms out).
    ///
    /// Rejects factors that would collapse, invert or overflow the viewport;
    /// the viewport is unchanged on error.
    pub fn zoom_by(&mut self, factor: f64) -> crate::Result<()> {
        self.half_span = self.checked_span(self.center, factor)?;
        Ok(())
    }

    /// Zoom toward the pointer so the point under it stays fixed.
    ///
    /// The pan delta is computed from the pre-zoom half-span, then the zoom
    /// is applied. Nothing changes if `factor` is rejected, including when
    /// the new bounds would no longer be distinct around the new centre.
    pub fn zoom_at(&mut self, frac_x: f64, frac_y: f64, factor: f64) -> crate::Result<()> {
        let mut zoomed = *self;
        zoomed.pan_by(frac_x, frac_y, 1.0 - factor);
        zoomed.half_span = self.checked_span(zoomed.center, factor)?;
        *self = zoomed;
        debug!(
            center = %self.center,
            half_span = self.half_span,
            factor,
            "Viewport zoomed"
        );
        Ok(())
    }

    /// Half-span after scaling by `factor` around `center`, or an error if
    /// the result is degenerate.
    fn checked_span(&self, center: Complex, factor: f64) -> crate::Result<f64> {
        if factor <= 0.0 || !factor.is_finite() {
            return Err(CoreError::InvalidZoomFactor(factor));
        }
        let next = self.half_span * factor;
        if next <= 0.0 || !next.is_finite() || !spans_resolve(center, next, self.aspect()) {
            return Err(CoreError::InvalidZoomFactor(factor));
        }
        Ok(next)
    }
}

/// Whether `center ± half_span` stays ordered on both axes in `f64`.
///
/// Past the last representable step around the centre the edges round onto
/// it and every pixel would sample the same point.
fn spans_resolve(center: Complex, half_span: f64, aspect: f64) -> bool {
    let half_span_im = half_span * aspect;
    center.re - half_span < center.re + half_span
        && center.im - half_span_im < center.im + half_span_im
}
