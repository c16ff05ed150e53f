use std::path::PathBuf;

/// Two-level grouping key for a screenshot: `<app_key>/<context_key>/`.
///
/// Both fields are non-empty. They are raw text; sanitizing them into path
/// segments happens when the destination path is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextKey {
    pub app_key: String,
    pub context_key: String,
}

/// Outcome of one save operation.
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    /// Local time formatted as `YYYY-MM-DD_HH-MM-SS`.
    pub timestamp: String,
    pub destination_path: PathBuf,
}
