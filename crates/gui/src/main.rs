mod app;
mod ui;
mod viewport;

use app::SketchApp;
use sketch_engine::state::AppSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sketch_gui=info,sketch_engine=info".into()),
        )
        .init();

    // --settings <path> overrides the saved settings for this session
    let settings = parse_settings_arg().unwrap_or_else(AppSettings::load);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GroundSketch")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "sketch-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(SketchApp::new(cc, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_settings_arg() -> Option<AppSettings> {
    let args: Vec<String> = std::env::args().collect();
    let index = args.iter().position(|a| a == "--settings")?;
    let path = args.get(index + 1)?;
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read settings file {path}: {e}");
            return None;
        }
    };
    match AppSettings::from_json(&json) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {path}");
            Some(settings)
        }
        Err(e) => {
            tracing::error!("{e} ({path})");
            None
        }
    }
}
