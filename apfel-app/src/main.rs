mod app;
mod app_dir;
mod input;
mod preferences;
mod render_bridge;

use eframe::egui;
use tracing::info;

use app::ApfelApp;
use preferences::AppPreferences;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Apfel");

    let prefs = AppPreferences::load();
    let (width, height) = prefs.canvas_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Apfel")
            .with_inner_size([width as f32, height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Apfel",
        options,
        Box::new(move |cc| Ok(Box::new(ApfelApp::new(&cc.egui_ctx, &prefs)?))),
    )
}
