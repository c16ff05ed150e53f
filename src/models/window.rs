//! Foreground window snapshot.
//!
//! Produced by the window inspector on every hotkey press and consumed
//! immediately by the context resolver.

/// Process name reported when the owning executable cannot be resolved.
pub const UNKNOWN_PROCESS: &str = "Unknown";

/// Title used in place of an empty window title.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Executable file name (e.g. `chrome.exe`), never a full path.
    pub process_name: String,
    /// Raw title text; may be empty.
    pub window_title: String,
}

impl WindowInfo {
    pub fn new(process_name: impl Into<String>, window_title: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            window_title: window_title.into(),
        }
    }

    /// Window info for when no focused window could be found.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PROCESS, "")
    }

    /// Title with the `Untitled` placeholder substituted for empty text.
    pub fn title_or_placeholder(&self) -> &str {
        if self.window_title.is_empty() {
            UNTITLED
        } else {
            &self.window_title
        }
    }

    /// Process name with the `Unknown` sentinel substituted for empty text.
    pub fn process_or_sentinel(&self) -> &str {
        if self.process_name.is_empty() {
            UNKNOWN_PROCESS
        } else {
            &self.process_name
        }
    }
}
