use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use apfel_core::{Fractal, FrameSnapshot};

use crate::frame::EscapeFrame;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// Advancing the generation tells an in-flight frame to stop at the next
/// row boundary. The progress counters count finished rows.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            progress_done: AtomicUsize::new(0),
            progress_total: AtomicUsize::new(0),
        }
    }

    /// Cancel the current render by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(rows done, rows total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a full-frame render.
///
/// Contains raw escape counts (no coloring); the caller applies a color map
/// to produce displayable pixels. A cancelled frame is only partly filled
/// and should be discarded.
#[derive(Debug)]
pub struct RenderResult {
    pub frame: EscapeFrame,
    pub snapshot: FrameSnapshot,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub rows_rendered: u32,
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Render a full frame from an immutable snapshot.
///
/// Pixels are visited in row-major order on the calling thread. The `cancel`
/// handle is checked between rows, so a newer input event can abandon a
/// stale frame from another thread.
///
/// The budget and viewport are validated once up front, since a snapshot's
/// public viewport fields may have been edited; either failure is reported
/// without touching any pixel.
pub fn render_frame<F: Fractal>(
    fractal: &F,
    snapshot: &FrameSnapshot,
    cancel: &RenderCancel,
) -> crate::Result<RenderResult> {
    let start = Instant::now();
    let gen = cancel.generation();
    let viewport = &snapshot.viewport;
    let budget = &snapshot.budget;

    budget.validate()?;
    viewport.validate()?;
    let mut frame = EscapeFrame::new(viewport.width, viewport.height, budget.max_iterations())?;

    debug!(
        fractal = fractal.name(),
        width = viewport.width,
        height = viewport.height,
        max_iterations = budget.max_iterations(),
        half_span = viewport.half_span(),
        "Starting frame render"
    );
    cancel.reset_progress(viewport.height as usize);

    let mut rows_rendered = 0;
    let mut cancelled = false;
    for py in 0..viewport.height {
        if cancel.generation() != gen {
            cancelled = true;
            break;
        }
        for (px, out) in frame.row_mut(py).iter_mut().enumerate() {
            let c = viewport.pixel_to_complex(px as u32, py);
            *out = fractal.iterate(c, budget);
        }
        rows_rendered += 1;
        cancel.inc_progress();
    }

    let elapsed = start.elapsed();
    if cancelled {
        debug!(rows_rendered, "Frame render superseded");
    } else {
        info!(elapsed_ms = elapsed.as_millis(), rows_rendered, "Render complete");
    }

    Ok(RenderResult {
        frame,
        snapshot: *snapshot,
        elapsed,
        cancelled,
        rows_rendered,
    })
}
