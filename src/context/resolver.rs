//! Context inference for a focused window.
//!
//! Picks the leaf folder a screenshot is filed under. Browsers are keyed by
//! the site being viewed (from the DevTools channel when it answers, else
//! from a hostname found in the title); everything else is keyed by the
//! last `" - "` segment of the title.
//!
//! The "rightmost hostname" and "last segment" tie-breaks match the layout
//! produced by earlier releases. They suit the common `Page - Site` title
//! convention but are not correct for every application.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::window::UNTITLED;
use crate::models::{ContextKey, WindowInfo};
use crate::sensing::BrowserTabs;

const TITLE_SEPARATOR: &str = " - ";

static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z0-9.-]+\.[A-Za-z]{2,})\b").expect("hostname pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chromium,
    Firefox,
    Other,
}

impl BrowserFamily {
    /// Classify an executable name. Case is ignored.
    pub fn classify(process_name: &str) -> Self {
        let lower = process_name.to_lowercase();
        if lower.starts_with("chrome") || lower.starts_with("chromium") {
            BrowserFamily::Chromium
        } else if lower.contains("firefox") {
            BrowserFamily::Firefox
        } else {
            BrowserFamily::Other
        }
    }
}

/// Resolve the full grouping key for a window.
pub fn resolve_context(window: &WindowInfo, browser: &dyn BrowserTabs) -> ContextKey {
    let app_key = window.process_or_sentinel().to_string();
    let context_key = context_key_for(&app_key, window.title_or_placeholder(), browser);
    ContextKey {
        app_key,
        context_key,
    }
}

/// Derive the leaf folder name from a process name and title.
///
/// Never fails and never returns an empty string.
pub fn context_key_for(process_name: &str, title: &str, browser: &dyn BrowserTabs) -> String {
    let family = BrowserFamily::classify(process_name);

    let domain = match family {
        // A tab URL without a network location (`file:`, `about:blank`)
        // still counts as an answer: the title is not scanned for hostnames.
        BrowserFamily::Chromium => match browser.active_tab_url().filter(|u| Url::parse(u).is_ok()) {
            Some(url) => url_netloc(&url),
            None => {
                debug!("no tab URL from {}, scanning title", browser.name());
                extract_domain(title)
            }
        },
        BrowserFamily::Firefox => extract_domain(title),
        BrowserFamily::Other => None,
    };

    let key = domain.unwrap_or_else(|| last_title_segment(title).to_string());
    debug!("context for {process_name} ({family:?}): {key:?}");

    if key.is_empty() {
        UNTITLED.to_string()
    } else {
        key
    }
}

/// Rightmost hostname-like substring of `text`, if any.
pub fn extract_domain(text: &str) -> Option<String> {
    HOSTNAME_RE
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
}

/// Text after the last `" - "`, or the whole title when there is none.
fn last_title_segment(title: &str) -> &str {
    title
        .rsplit_once(TITLE_SEPARATOR)
        .map(|(_, tail)| tail)
        .unwrap_or(title)
}

/// Network location of a URL exactly as written (`user@host:port`).
///
/// The text is taken verbatim rather than from the parsed host so case,
/// non-ASCII names and default ports survive into the folder name. `None`
/// when the URL has no authority part or it is empty.
fn url_netloc(raw: &str) -> Option<String> {
    let (_, rest) = raw.split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];
    (!netloc.is_empty()).then(|| netloc.to_string())
}
