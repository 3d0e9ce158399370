use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;
use tracing::{debug, error};

use apfel_core::{Complex, FrameSnapshot, Julia, Mandelbrot};
use apfel_render::{colorize, render_frame, RenderCancel, RenderResult};

use crate::app::{ApfelApp, FractalMode};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderPhase {
    Idle,
    Rendering,
    Done,
    Failed,
}

impl RenderPhase {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Rendering => "Rendering\u{2026}",
            Self::Done => "Done",
            Self::Failed => "Render failed",
        }
    }
}

pub(crate) struct RenderRequest {
    pub(crate) id: u64,
    pub(crate) snapshot: FrameSnapshot,
    pub(crate) mode: FractalMode,
    pub(crate) julia_c: Complex,
}

/// A finished frame, or the reason the request could not be rendered.
pub(crate) struct RenderResponse {
    pub(crate) id: u64,
    pub(crate) result: apfel_render::Result<RenderResult>,
}

// ---------------------------------------------------------------------------
// Render dispatch and polling
// ---------------------------------------------------------------------------

impl ApfelApp {
    /// Supersede any in-flight frame and queue one for the current state.
    pub(crate) fn request_render(&mut self) {
        self.cancel.cancel();
        self.render_id += 1;

        let snapshot = self.explorer.snapshot();
        debug!(
            id = self.render_id,
            max_iterations = snapshot.budget.max_iterations(),
            half_span = snapshot.viewport.half_span(),
            "Requesting render"
        );

        let req = RenderRequest {
            id: self.render_id,
            snapshot,
            mode: self.mode,
            julia_c: self.julia_c,
        };

        if self.tx_request.send(req).is_err() {
            error!("Render worker is gone");
        }
        self.render_phase = RenderPhase::Rendering;
        self.needs_render = false;
    }

    /// Accept the newest finished frame; stale or cancelled ones are dropped.
    /// A failed request keeps the previous frame on screen.
    pub(crate) fn poll_responses(&mut self, ctx: &egui::Context) {
        while let Ok(RenderResponse { id, result }) = self.rx_response.try_recv() {
            if id != self.render_id {
                continue;
            }
            match result {
                Ok(result) if !result.cancelled => {
                    self.apply_result(ctx, result);
                    self.render_phase = RenderPhase::Done;
                }
                Ok(_) => {}
                Err(_) => self.render_phase = RenderPhase::Failed,
            }
        }
    }

    fn apply_result(&mut self, ctx: &egui::Context, result: RenderResult) {
        self.render_time = result.elapsed;
        self.current_frame = Some(result.frame);
        self.recolorize(ctx);
    }

    /// Re-apply the palette to the last frame without recomputing it.
    pub(crate) fn recolorize(&mut self, ctx: &egui::Context) {
        let Some(frame) = &self.current_frame else {
            return;
        };
        let buffer = colorize(&self.palette, frame);
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [buffer.width as usize, buffer.height as usize],
            &buffer.pixels,
        );
        self.texture = Some(ctx.load_texture("fractal", image, egui::TextureOptions::LINEAR));
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn drain_latest(initial: RenderRequest, rx: &mpsc::Receiver<RenderRequest>) -> RenderRequest {
    let mut req = initial;
    while let Ok(newer) = rx.try_recv() {
        req = newer;
    }
    req
}

pub(crate) fn render_for_mode(
    req: &RenderRequest,
    cancel: &RenderCancel,
) -> apfel_render::Result<RenderResult> {
    match req.mode {
        FractalMode::Mandelbrot => render_frame(&Mandelbrot, &req.snapshot, cancel),
        FractalMode::Julia => render_frame(&Julia::new(req.julia_c), &req.snapshot, cancel),
    }
}

/// Worker loop: render only the newest queued request, one frame at a time.
pub(crate) fn render_worker(
    ctx: egui::Context,
    rx: mpsc::Receiver<RenderRequest>,
    tx: mpsc::Sender<RenderResponse>,
    cancel: Arc<RenderCancel>,
) {
    while let Ok(initial) = rx.recv() {
        let req = drain_latest(initial, &rx);

        let result = render_for_mode(&req, &cancel);
        match &result {
            Ok(frame) if frame.cancelled => continue,
            Ok(_) => {}
            Err(e) => error!(id = req.id, "Render failed: {e}"),
        }

        if tx.send(RenderResponse { id: req.id, result }).is_err() {
            return;
        }
        ctx.request_repaint();
    }
}
