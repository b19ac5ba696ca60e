use eframe::egui;
use libris::gui::LibrisApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("libris=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Libris")
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Libris",
        options,
        Box::new(|cc| {
            let app = LibrisApp::new(cc)?;
            Ok(Box::new(app))
        }),
    )
}
