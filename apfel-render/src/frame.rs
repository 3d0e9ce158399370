use apfel_core::CoreError;

use crate::error::RenderError;

/// Per-pixel escape counts for a full frame, row-major.
///
/// This is the raw output of the renderer before coloring. Keeping counts
/// separate from colored pixels lets the palette change without
/// re-iterating.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeFrame {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<u32>,
}

impl EscapeFrame {
    /// A zeroed frame. `max_iterations` must be at least 1 so values normalize.
    pub fn new(width: u32, height: u32, max_iterations: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations).into());
        }
        Ok(Self {
            width,
            height,
            max_iterations,
            data: vec![0; width as usize * height as usize],
        })
    }

    #[inline]
    pub fn iterations(&self, x: u32, y: u32) -> u32 {
        self.data[self.index(x, y)]
    }

    /// `iterations / max_iterations`, clamped to `[0, 1]`.
    #[inline]
    pub fn normalized(&self, x: u32, y: u32) -> f64 {
        self.normalize(self.iterations(x, y))
    }

    #[inline]
    pub fn normalize(&self, iterations: u32) -> f64 {
        (iterations as f64 / self.max_iterations as f64).clamp(0.0, 1.0)
    }

    /// Normalized values in row-major order.
    pub fn normalized_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|&n| self.normalize(n))
    }

    /// Mutable access to row `y`.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.data[start..start + w]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_zeroed() {
        let f = EscapeFrame::new(4, 3, 10).unwrap();
        assert_eq!(f.data.len(), 12);
        assert!(f.data.iter().all(|&n| n == 0));
    }

    #[test]
    fn rejects_degenerate_frames() {
        assert_eq!(
            EscapeFrame::new(0, 3, 10),
            Err(RenderError::InvalidDimensions { width: 0, height: 3 })
        );
        assert_eq!(
            EscapeFrame::new(3, 3, 0),
            Err(RenderError::Core(CoreError::InvalidMaxIterations(0)))
        );
    }

    #[test]
    fn normalizes_into_unit_range() {
        let mut f = EscapeFrame::new(3, 1, 4).unwrap();
        f.row_mut(0).copy_from_slice(&[0, 2, 9]);
        let values: Vec<f64> = f.normalized_values().collect();
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
        assert_eq!(f.normalized(1, 0), 0.5);
    }

    #[test]
    fn rows_are_row_major() {
        let mut f = EscapeFrame::new(2, 2, 5).unwrap();
        f.row_mut(1).copy_from_slice(&[3, 4]);
        assert_eq!(f.iterations(0, 1), 3);
        assert_eq!(f.iterations(1, 1), 4);
        assert_eq!(f.data, vec![0, 0, 3, 4]);
    }
}
