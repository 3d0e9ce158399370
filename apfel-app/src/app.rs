use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use apfel_core::{Complex, Explorer, Viewport};
use apfel_render::{EscapeFrame, Palette, PaletteKind, RenderCancel};

use crate::preferences::AppPreferences;
use crate::render_bridge::{render_worker, RenderPhase, RenderRequest, RenderResponse};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;

// ---------------------------------------------------------------------------
// Fractal mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FractalMode {
    #[default]
    Mandelbrot,
    Julia,
}

impl FractalMode {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    /// Startup bounds for this fractal.
    pub(crate) fn home_viewport(self, width: u32, height: u32) -> Viewport {
        match self {
            Self::Mandelbrot => Viewport::default_mandelbrot(width, height),
            Self::Julia => Viewport::default_julia(width, height),
        }
    }
}

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct ApfelApp {
    // Fractal state
    pub(crate) mode: FractalMode,
    pub(crate) julia_c: Complex,
    pub(crate) explorer: Explorer,

    // Render thread
    pub(crate) tx_request: mpsc::Sender<RenderRequest>,
    pub(crate) rx_response: mpsc::Receiver<RenderResponse>,
    pub(crate) cancel: Arc<RenderCancel>,
    pub(crate) render_id: u64,
    pub(crate) render_phase: RenderPhase,
    pub(crate) needs_render: bool,

    // Last render
    pub(crate) current_frame: Option<EscapeFrame>,
    pub(crate) texture: Option<egui::TextureHandle>,
    pub(crate) render_time: Duration,

    // Coloring
    pub(crate) palette_kind: PaletteKind,
    pub(crate) palette: Palette,

    // UI state
    pub(crate) preferences: AppPreferences,
    pub(crate) show_hud: bool,
    pub(crate) cursor_complex: Option<Complex>,
}

impl ApfelApp {
    pub(crate) fn new(egui_ctx: &egui::Context, prefs: &AppPreferences) -> apfel_core::Result<Self> {
        let (w, h) = prefs.canvas_size();
        let explorer = Explorer::with_viewport(prefs.explorer, prefs.fractal.home_viewport(w, h))?;

        let (tx_req, rx_req) = mpsc::channel();
        let (tx_resp, rx_resp) = mpsc::channel();
        let cancel = Arc::new(RenderCancel::new());

        let ctx = egui_ctx.clone();
        let cancel_clone = cancel.clone();
        thread::spawn(move || {
            render_worker(ctx, rx_req, tx_resp, cancel_clone);
        });

        info!(
            width = w,
            height = h,
            mode = prefs.fractal.label(),
            max_iterations = explorer.budget().max_iterations(),
            "Explorer ready"
        );

        Ok(Self {
            mode: prefs.fractal,
            julia_c: prefs.julia_c,
            explorer,
            tx_request: tx_req,
            rx_response: rx_resp,
            cancel,
            render_id: 0,
            render_phase: RenderPhase::Idle,
            needs_render: true,
            current_frame: None,
            texture: None,
            render_time: Duration::ZERO,
            palette_kind: prefs.palette,
            palette: prefs.palette.palette(),
            preferences: prefs.clone(),
            show_hud: prefs.show_hud,
            cursor_complex: None,
        })
    }

    /// Cycle to the next built-in palette and recolor the current frame.
    pub(crate) fn next_palette(&mut self, ctx: &egui::Context) {
        let idx = PaletteKind::ALL
            .iter()
            .position(|&k| k == self.palette_kind)
            .unwrap_or(0);
        self.palette_kind = PaletteKind::ALL[(idx + 1) % PaletteKind::ALL.len()];
        self.palette = self.palette_kind.palette();
        debug!(palette = self.palette.name, "Palette changed");
        self.recolorize(ctx);
    }

    /// Draw the last finished frame and route canvas input.
    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let vp = self.explorer.viewport();
                let size = egui::vec2(vp.width as f32, vp.height as f32);
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

                if let Some(tex) = &self.texture {
                    ui.painter().image(
                        tex.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                self.handle_canvas_input(ctx, &response);
            });
    }

    fn show_hud(&self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }
        let vp = self.explorer.viewport();
        let budget = self.explorer.budget();
        egui::Area::new(egui::Id::new("hud"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.label(format!("{}  [{}]", self.mode.label(), self.palette.name));
                        ui.label(format!("Center: {}", vp.center));
                        ui.label(format!("Half-span: {:.3e}", vp.half_span()));
                        ui.label(format!(
                            "Iterations: {} ({:.1})",
                            budget.max_iterations(),
                            budget.raw_max_iterations()
                        ));
                        if let Some(c) = self.cursor_complex {
                            ui.label(format!("Cursor: {c}"));
                        }
                        let (done, total) = self.cancel.progress();
                        ui.label(format!(
                            "{}  {done}/{total} rows  {} ms",
                            self.render_phase.label(),
                            self.render_time.as_millis()
                        ));
                    });
            });
    }
}

impl eframe::App for ApfelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.poll_responses(ctx);
        self.handle_keyboard(ctx);
        self.show_canvas(ctx);
        self.show_hud(ctx);

        if self.needs_render {
            self.request_render();
        }
    }
}
