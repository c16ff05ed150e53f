//! Global hotkey: one shortcut, one capture per press.

use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::capture::CaptureController;

/// Parse a shortcut string like `"F9"` or `"Ctrl+Shift+S"` into a `HotKey`.
pub fn parse_shortcut(s: &str) -> Result<HotKey> {
    let mut modifiers = Modifiers::empty();
    let mut key_code: Option<Code> = None;

    for token in s.split('+').map(str::trim) {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
            "alt" | "option" => modifiers |= Modifiers::ALT,
            "shift" => modifiers |= Modifiers::SHIFT,
            "super" | "win" | "meta" | "cmd" => modifiers |= Modifiers::SUPER,
            _ => {
                if key_code.is_some() {
                    bail!("multiple keys in shortcut {s:?}");
                }
                key_code = Some(parse_key_code(token)?);
            }
        }
    }

    let Some(code) = key_code else {
        bail!("no key in shortcut {s:?}");
    };
    let mods = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(mods, code))
}

const LETTERS: [Code; 26] = [
    Code::KeyA, Code::KeyB, Code::KeyC, Code::KeyD, Code::KeyE, Code::KeyF, Code::KeyG,
    Code::KeyH, Code::KeyI, Code::KeyJ, Code::KeyK, Code::KeyL, Code::KeyM, Code::KeyN,
    Code::KeyO, Code::KeyP, Code::KeyQ, Code::KeyR, Code::KeyS, Code::KeyT, Code::KeyU,
    Code::KeyV, Code::KeyW, Code::KeyX, Code::KeyY, Code::KeyZ,
];

const DIGITS: [Code; 10] = [
    Code::Digit0, Code::Digit1, Code::Digit2, Code::Digit3, Code::Digit4,
    Code::Digit5, Code::Digit6, Code::Digit7, Code::Digit8, Code::Digit9,
];

const FUNCTION_KEYS: [Code; 12] = [
    Code::F1, Code::F2, Code::F3, Code::F4, Code::F5, Code::F6,
    Code::F7, Code::F8, Code::F9, Code::F10, Code::F11, Code::F12,
];

fn parse_key_code(token: &str) -> Result<Code> {
    let lower = token.to_ascii_lowercase();

    if let &[ch] = lower.as_bytes() {
        match ch {
            b'a'..=b'z' => return Ok(LETTERS[(ch - b'a') as usize]),
            b'0'..=b'9' => return Ok(DIGITS[(ch - b'0') as usize]),
            _ => {}
        }
    }

    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
        if (1..=FUNCTION_KEYS.len()).contains(&n) {
            return Ok(FUNCTION_KEYS[n - 1]);
        }
    }

    let code = match lower.as_str() {
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "escape" | "esc" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" | "del" => Code::Delete,
        "insert" | "ins" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "printscreen" | "print" => Code::PrintScreen,
        "pause" => Code::Pause,
        _ => bail!("unknown key {token:?}"),
    };
    Ok(code)
}

/// Run a capture if `event` is a press of the registered hotkey.
///
/// Returns whether a capture was attempted. Capture errors are logged and
/// swallowed so the listener survives them.
pub fn handle_hotkey_event(
    event: &GlobalHotKeyEvent,
    hotkey_id: u32,
    controller: &CaptureController,
) -> bool {
    if event.state != HotKeyState::Pressed || event.id != hotkey_id {
        return false;
    }

    if let Err(err) = controller.capture() {
        error!("Screenshot failed: {err:#}");
    }
    true
}

struct Listener {
    controller: CaptureController,
    hotkey: HotKey,
    _manager: GlobalHotKeyManager,
}

impl ApplicationHandler<GlobalHotKeyEvent> for Listener {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, _event: WindowEvent) {}

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: GlobalHotKeyEvent) {
        handle_hotkey_event(&event, self.hotkey.id(), &self.controller);
    }
}

/// Register the configured hotkey and block, capturing on every press.
///
/// Hotkey events are forwarded into the event loop, so captures run one at
/// a time on the main thread.
pub fn run_listener(controller: CaptureController) -> Result<()> {
    let shortcut = controller.config().hotkey.clone();
    let hotkey = parse_shortcut(&shortcut)?;

    let event_loop = EventLoop::<GlobalHotKeyEvent>::with_user_event()
        .build()
        .context("create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let proxy = Mutex::new(event_loop.create_proxy());
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if let Ok(proxy) = proxy.lock() {
            // Fails only once the loop has exited.
            let _ = proxy.send_event(event);
        }
    }));

    let manager = GlobalHotKeyManager::new().context("create hotkey manager")?;
    manager
        .register(hotkey)
        .with_context(|| format!("register hotkey {shortcut}"))?;

    info!("Listening for {shortcut} key to capture screenshots...");

    let mut listener = Listener {
        controller,
        hotkey,
        _manager: manager,
    };
    event_loop
        .run_app(&mut listener)
        .context("event loop terminated")?;
    Ok(())
}
