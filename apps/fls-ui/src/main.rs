#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::FlsApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let (session, endpoint) = match app::connect_session() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("NS-FLS Simulation Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "NS-FLS Simulation Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(FlsApp::new(cc, session, endpoint)))),
    )
}
