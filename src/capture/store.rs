//! Destination layout and PNG writing.
//!
//! `<root>/<app_key>/<context_key>/<timestamp> <title>.png`, every segment
//! sanitized. Folders are created on demand and never removed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

use crate::context::sanitize;
use crate::models::ContextKey;

pub fn destination_path(root: &Path, key: &ContextKey, title: &str, timestamp: &str) -> PathBuf {
    root.join(sanitize(&key.app_key))
        .join(sanitize(&key.context_key))
        .join(format!("{timestamp} {}.png", sanitize(title)))
}

/// Write `image` as PNG, creating missing parent folders.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create folder {}", parent.display()))?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write screenshot to {}", path.display()))
}

/// Path as shown in logs: relative to the folder containing the root, so it
/// starts with the root's own name (`Screenshots/...`).
pub fn display_path<'a>(root: &Path, path: &'a Path) -> &'a Path {
    let base = root.parent().unwrap_or(root);
    path.strip_prefix(base).unwrap_or(path)
}
