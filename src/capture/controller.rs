use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};

use crate::config::CaptureConfig;
use crate::context::resolve_context;
use crate::models::CaptureRecord;
use crate::sensing::{BrowserTabs, ScreenGrabber, WindowInspector};

use super::store::{destination_path, display_path, save_png};

/// Runs one screenshot from window query to file on disk.
pub struct CaptureController {
    config: CaptureConfig,
    inspector: Box<dyn WindowInspector>,
    browser: Box<dyn BrowserTabs>,
    screen: Box<dyn ScreenGrabber>,
}

impl CaptureController {
    pub fn new(
        config: CaptureConfig,
        inspector: Box<dyn WindowInspector>,
        browser: Box<dyn BrowserTabs>,
        screen: Box<dyn ScreenGrabber>,
    ) -> Self {
        Self {
            config,
            inspector,
            browser,
            screen,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn capture(&self) -> Result<CaptureRecord> {
        self.capture_at(Local::now())
    }

    /// Capture with an explicit timestamp for the file name.
    pub fn capture_at(&self, now: DateTime<Local>) -> Result<CaptureRecord> {
        let capture_start = Instant::now();

        let window = self.inspector.active_window();
        let key = resolve_context(&window, self.browser.as_ref());
        debug!(
            "window {:?} -> {}/{}",
            window, key.app_key, key.context_key
        );

        let timestamp = now.format(&self.config.timestamp_format).to_string();
        let destination = destination_path(
            &self.config.root_dir,
            &key,
            window.title_or_placeholder(),
            &timestamp,
        );

        let screenshot_start = Instant::now();
        let image = self.screen.grab().context("screen capture failed")?;
        let screenshot_duration_ms = screenshot_start.elapsed().as_millis();

        save_png(&image, &destination)?;

        info!(
            "Screenshot saved: {}",
            display_path(&self.config.root_dir, &destination).display()
        );
        debug!(
            "Capture completed in {}ms ({}x{}, screenshot: {}ms)",
            capture_start.elapsed().as_millis(),
            image.width(),
            image.height(),
            screenshot_duration_ms
        );

        Ok(CaptureRecord {
            timestamp,
            destination_path: destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use anyhow::bail;
    use chrono::TimeZone;
    use image::{Rgba, RgbaImage};

    use crate::models::WindowInfo;
    use crate::sensing::NoBrowser;

    struct FixedWindow(&'static str, &'static str);

    impl WindowInspector for FixedWindow {
        fn active_window(&self) -> WindowInfo {
            WindowInfo::new(self.0, self.1)
        }
    }

    struct SolidScreen;

    impl ScreenGrabber for SolidScreen {
        fn grab(&self) -> Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(4, 3, Rgba([0, 128, 255, 255])))
        }
    }

    struct BrokenScreen;

    impl ScreenGrabber for BrokenScreen {
        fn grab(&self) -> Result<RgbaImage> {
            bail!("display server went away")
        }
    }

    struct DeadChannel;

    impl BrowserTabs for DeadChannel {
        fn active_tab_url(&self) -> Option<String> {
            None
        }

        fn name(&self) -> &str {
            "dead"
        }
    }

    fn controller(
        root: PathBuf,
        window: FixedWindow,
        browser: Box<dyn BrowserTabs>,
        screen: Box<dyn ScreenGrabber>,
    ) -> CaptureController {
        CaptureController::new(CaptureConfig::with_root(root), Box::new(window), browser, screen)
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn chrome_without_channel_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Screenshots");
        let ctl = controller(
            root.clone(),
            FixedWindow("chrome.exe", "Example Domain - example.com"),
            Box::new(DeadChannel),
            Box::new(SolidScreen),
        );

        let record = ctl.capture_at(fixed_time()).unwrap();

        assert_eq!(record.timestamp, "2024-01-02_03-04-05");
        assert_eq!(
            record.destination_path,
            root.join("chrome.exe")
                .join("example.com")
                .join("2024-01-02_03-04-05 Example Domain - example.com.png")
        );
        let written = image::open(&record.destination_path).unwrap();
        assert_eq!((written.width(), written.height()), (4, 3));
    }

    #[test]
    fn empty_title_and_process_use_placeholders() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let ctl = controller(
            root.clone(),
            FixedWindow("", ""),
            Box::new(NoBrowser),
            Box::new(SolidScreen),
        );

        let record = ctl.capture_at(fixed_time()).unwrap();
        assert_eq!(
            record.destination_path,
            root.join("Unknown")
                .join("Untitled")
                .join("2024-01-02_03-04-05 Untitled.png")
        );
        assert!(record.destination_path.is_file());
    }

    #[test]
    fn existing_folder_keeps_its_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let folder = root.join("notepad.exe").join("Notepad");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("2023-12-31_23-59-59 Old - Notepad.png"), b"old").unwrap();

        let ctl = controller(
            root,
            FixedWindow("notepad.exe", "Todo: list - Notepad"),
            Box::new(NoBrowser),
            Box::new(SolidScreen),
        );
        let record = ctl.capture_at(fixed_time()).unwrap();

        assert_eq!(
            record.destination_path,
            folder.join("2024-01-02_03-04-05 Todo_ list - Notepad.png")
        );
        assert_eq!(
            fs::read(folder.join("2023-12-31_23-59-59 Old - Notepad.png")).unwrap(),
            b"old"
        );
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 2);
    }

    #[test]
    fn failed_grab_is_an_error_and_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Screenshots");
        let ctl = controller(
            root.clone(),
            FixedWindow("chrome.exe", "Example Domain - example.com"),
            Box::new(NoBrowser),
            Box::new(BrokenScreen),
        );

        let err = ctl.capture_at(fixed_time()).unwrap_err();
        assert!(format!("{err:#}").contains("display server went away"));
        assert!(!root.exists());
    }

    #[test]
    fn unwritable_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let ctl = controller(
            blocker,
            FixedWindow("notepad.exe", "A - Notepad"),
            Box::new(NoBrowser),
            Box::new(SolidScreen),
        );
        assert!(ctl.capture_at(fixed_time()).is_err());
    }
}
