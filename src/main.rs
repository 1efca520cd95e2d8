use anyhow::Result;
use buddy::integration::BuddyConfig;
use buddy::ui::BuddyApp;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buddy=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BuddyConfig::load(path)?,
        None => BuddyConfig::default(),
    };
    config.validate()?;

    info!("Starting Lil' Buddy");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Lil' Buddy"),
        ..Default::default()
    };

    eframe::run_native(
        "Lil' Buddy",
        options,
        Box::new(move |cc| Ok(Box::new(BuddyApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
