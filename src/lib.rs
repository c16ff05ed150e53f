pub mod capture;
pub mod config;
pub mod context;
pub mod hotkey;
pub mod models;
pub mod sensing;
mod utils;

use anyhow::Result;
use log::info;

use capture::CaptureController;
use config::CaptureConfig;
use sensing::{connect_browser, DesktopInspector, PrimaryMonitor};

/// Start the listener and block until the process is killed.
pub fn run() -> Result<()> {
    utils::logging::init_logging();

    info!("contextshot v{} starting", env!("CARGO_PKG_VERSION"));

    let config = CaptureConfig::load()?;
    info!("Saving screenshots under {}", config.root_dir.display());

    let browser = connect_browser(&config);
    let controller = CaptureController::new(
        config,
        Box::new(DesktopInspector),
        browser,
        Box::new(PrimaryMonitor),
    );

    hotkey::run_listener(controller)
}
