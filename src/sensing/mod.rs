pub mod browser;
pub mod screen;
pub mod window;

pub use browser::{connect_browser, BrowserTabs, DevToolsClient, NoBrowser};
pub use screen::{PrimaryMonitor, ScreenGrabber};
pub use window::{DesktopInspector, WindowInspector};
