use eframe::egui;
use tracing::{error, info};

use apfel_core::Explorer;

use crate::app::{ApfelApp, FractalMode};

impl ApfelApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        self.cursor_complex = response.hover_pos().map(|pos| {
            let px = (pos.x - response.rect.min.x) as f64;
            let py = (pos.y - response.rect.min.y) as f64;
            self.explorer.pointer_moved(px, py);
            self.explorer.viewport().to_complex(px, py)
        });

        if !response.hovered() {
            return;
        }
        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        match self.explorer.scrolled(scroll_y as f64) {
            Ok(true) => self.needs_render = true,
            Ok(false) => {}
            Err(e) => error!("Zoom rejected: {e}"),
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let (reset, toggle_hud, next_palette, toggle_julia) = ctx.input(|input| {
            (
                input.key_pressed(egui::Key::R),
                input.key_pressed(egui::Key::H),
                input.key_pressed(egui::Key::P),
                input.key_pressed(egui::Key::J),
            )
        });

        if reset {
            self.reset_view();
        }
        if toggle_hud {
            self.show_hud = !self.show_hud;
            self.preferences.show_hud = self.show_hud;
            self.preferences.save();
        }
        if next_palette {
            self.next_palette(ctx);
            self.preferences.palette = self.palette_kind;
            self.preferences.save();
        }
        if toggle_julia {
            self.toggle_julia();
        }
    }

    fn reset_view(&mut self) {
        match self.explorer.reset() {
            Ok(()) => self.needs_render = true,
            Err(e) => error!("Reset failed: {e}"),
        }
    }

    /// Switch between the Mandelbrot set and the Julia set of the point
    /// under the cursor.
    fn toggle_julia(&mut self) {
        let mode = match self.mode {
            FractalMode::Mandelbrot => {
                if let Some(c) = self.cursor_complex {
                    self.julia_c = c;
                }
                FractalMode::Julia
            }
            FractalMode::Julia => FractalMode::Mandelbrot,
        };

        let vp = self.explorer.viewport();
        let home = mode.home_viewport(vp.width, vp.height);
        match Explorer::with_viewport(*self.explorer.config(), home) {
            Ok(explorer) => {
                self.explorer = explorer;
                self.mode = mode;
                self.current_frame = None;
                self.needs_render = true;
                self.preferences.fractal = mode;
                self.preferences.julia_c = self.julia_c;
                self.preferences.save();
                info!(mode = mode.label(), c = %self.julia_c, "Fractal switched");
            }
            Err(e) => error!("Cannot switch to {}: {e}", mode.label()),
        }
    }
}
