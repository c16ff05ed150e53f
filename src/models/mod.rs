pub mod capture;
pub mod window;

pub use capture::{CaptureRecord, ContextKey};
pub use window::WindowInfo;
