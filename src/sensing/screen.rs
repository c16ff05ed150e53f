use anyhow::{anyhow, Context, Result};
use image::{ImageBuffer, RgbaImage};
use xcap::Monitor;

/// Source of the screen bitmap written for each capture.
pub trait ScreenGrabber {
    fn grab(&self) -> Result<RgbaImage>;
}

/// Full-frame capture of the primary display (first display when none
/// reports itself as primary).
pub struct PrimaryMonitor;

impl ScreenGrabber for PrimaryMonitor {
    fn grab(&self) -> Result<RgbaImage> {
        let monitors = Monitor::all().context("failed to enumerate monitors")?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .ok_or_else(|| anyhow!("No monitors found"))?;

        let image = monitor
            .capture_image()
            .context("failed to capture monitor")?;

        let width = image.width();
        let height = image.height();
        ImageBuffer::from_raw(width, height, image.into_raw())
            .ok_or_else(|| anyhow!("Failed to create image buffer"))
    }
}
