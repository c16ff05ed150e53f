//! Active tab lookup over the Chromium DevTools HTTP endpoint.
//!
//! Chromium only exposes the endpoint when launched with
//! `--remote-debugging-port`. When it is not reachable at startup the
//! resolver gets [`NoBrowser`] and works from window titles alone.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::CaptureConfig;

/// Optional capability: URL of the tab the user is looking at.
pub trait BrowserTabs {
    /// `None` whenever the URL cannot be determined, for any reason.
    fn active_tab_url(&self) -> Option<String>;

    fn name(&self) -> &str;
}

/// Stand-in used when no debugging channel is available.
pub struct NoBrowser;

impl BrowserTabs for NoBrowser {
    fn active_tab_url(&self) -> Option<String> {
        None
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// One entry of `GET /json/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct DevToolsTarget {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    /// Not part of stock Chromium output; honoured when a proxy adds it.
    #[serde(default)]
    pub active: Option<bool>,
}

pub struct DevToolsClient {
    base_url: String,
    http: Client,
}

impl DevToolsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("failed to build DevTools HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Check that something answers on the endpoint.
    pub fn check_reachable(&self) -> Result<()> {
        let url = format!("{}/json/version", self.base_url);
        self.http
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("DevTools endpoint {url} not reachable"))?;
        Ok(())
    }

    pub fn list_targets(&self) -> Result<Vec<DevToolsTarget>> {
        let url = format!("{}/json/list", self.base_url);
        let targets = self
            .http
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("GET {url} failed"))?
            .json::<Vec<DevToolsTarget>>()
            .context("malformed DevTools target list")?;
        Ok(targets)
    }
}

impl BrowserTabs for DevToolsClient {
    fn active_tab_url(&self) -> Option<String> {
        match self.list_targets() {
            Ok(targets) => active_page_url(&targets),
            Err(err) => {
                debug!("tab lookup failed: {err:#}");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "devtools"
    }
}

/// URL of the active tab in a target list.
///
/// Targets flagged `active` win. Otherwise the first `page` target is used,
/// since Chromium lists pages most recently focused first.
pub fn active_page_url(targets: &[DevToolsTarget]) -> Option<String> {
    let has_flags = targets.iter().any(|t| t.active.is_some());
    let chosen = if has_flags {
        targets.iter().find(|t| t.active == Some(true))
    } else {
        targets.iter().find(|t| t.kind == "page")
    };

    chosen
        .map(|t| t.url.clone())
        .filter(|url| !url.is_empty())
}

/// Pick the browser capability for this run.
pub fn connect_browser(config: &CaptureConfig) -> Box<dyn BrowserTabs> {
    let Some(endpoint) = config.devtools_url.as_deref() else {
        info!("Browser tab lookup disabled");
        return Box::new(NoBrowser);
    };

    let client = match DevToolsClient::new(endpoint, config.devtools_timeout) {
        Ok(client) => client,
        Err(err) => {
            info!("Browser tab lookup unavailable: {err:#}");
            return Box::new(NoBrowser);
        }
    };

    match client.check_reachable() {
        Ok(()) => {
            info!("Browser tab lookup via DevTools at {endpoint}");
            Box::new(client)
        }
        Err(err) => {
            info!("Browser tab lookup unavailable, using window titles: {err:#}");
            Box::new(NoBrowser)
        }
    }
}
