#![cfg_attr(feature = "windows_gui", windows_subsystem = "windows")]

use multi_capture::capture::CaptureController;
use multi_capture::gui::{CaptureApp, APP_TITLE};
use multi_capture::logging;
use multi_capture::settings::{Settings, SETTINGS_FILE};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_ref().map(Into::into),
    );

    let controller = CaptureController::from_settings(&settings)?;
    tracing::info!("recording captures to {}", controller.csv_path().display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([settings.window_size.0, settings.window_size.1])
            .with_min_inner_size([480.0, 200.0]),
        ..Default::default()
    };

    let app = CaptureApp::new(controller, &settings);
    eframe::run_native(APP_TITLE, native_options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow::anyhow!("event loop failed: {err}"))?;
    Ok(())
}
