use anyhow::{Context, Result};
use log::{debug, warn};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use xcap::Window;

use crate::models::window::UNKNOWN_PROCESS;
use crate::models::WindowInfo;

/// Source of the currently focused window.
pub trait WindowInspector {
    /// Never fails: unresolvable processes come back as `Unknown`, missing
    /// titles as an empty string.
    fn active_window(&self) -> WindowInfo;
}

/// Reads the foreground window from the desktop session.
pub struct DesktopInspector;

impl WindowInspector for DesktopInspector {
    fn active_window(&self) -> WindowInfo {
        let (pid, title) = match focused_window() {
            Ok(Some(found)) => found,
            Ok(None) => {
                debug!("no focused window reported");
                return WindowInfo::unknown();
            }
            Err(err) => {
                warn!("active window query failed: {err:#}");
                return WindowInfo::unknown();
            }
        };

        let process_name = pid
            .and_then(executable_name)
            .unwrap_or_else(|| UNKNOWN_PROCESS.to_string());
        WindowInfo::new(process_name, title)
    }
}

/// PID (when the platform exposes one) and title of the focused window.
fn focused_window() -> Result<Option<(Option<u32>, String)>> {
    let windows = Window::all().context("failed to enumerate windows")?;

    let Some(window) = windows
        .into_iter()
        .find(|w| w.is_focused().unwrap_or(false))
    else {
        return Ok(None);
    };

    let pid = window.pid().ok();
    let title = window.title().unwrap_or_default();
    Ok(Some((pid, title)))
}

/// File name of the executable behind `pid` (e.g. `chrome.exe`).
fn executable_name(pid: u32) -> Option<String> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        ProcessRefreshKind::new().with_exe(UpdateKind::OnlyIfNotSet),
    );

    let Some(process) = system.process(pid) else {
        debug!("process {pid} not visible");
        return None;
    };

    // exe() is None when the process belongs to another user and we lack
    // permission; the short name is still readable in most of those cases.
    process
        .exe()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            let name = process.name().to_string_lossy();
            (!name.is_empty()).then(|| name.into_owned())
        })
}
