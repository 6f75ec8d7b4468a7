//=========================================================================
// Platform Subsystem
//
// Winit backend for the application controller.
//
// Architecture:
// ```text
//  Application (single thread)
//   │
//   ├─ create_window() ──> EventLoop::new()          (open windowing system)
//   │                      pump until resumed()      (window created here)
//   │
//   ├─ pump_messages() ──> pump_app_events(0 ms) ──> WindowHost::window_event()
//   │                                                  └─ window_procedure()
//   │                                                       └─ post Quit ─┐
//   │  <─────────────────── Receiver<PlatformEvent> <─────────────────────┘
//   │
//   └─ destroy_window() ─> WindowHost::destroy_window(), drop EventLoop
// ```
//
// The event loop is the windowing-system registration: it is dropped on
// every teardown and whenever window creation fails. Winit allows one
// loop per process, so a later creation attempt reports
// `Registration(RecreationAttempt)` at once instead of waiting for a
// resume that cannot come.
//
// Key Design Decisions:
// - **Pumped, not run**: the controller owns the loop. Each pump uses a
//   zero timeout, so polling never blocks.
// - **Explicit context**: the host is handed to every pump as the
//   `ApplicationHandler`, replacing any global back-reference.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS, so the application must be driven from `main`.
//
//=========================================================================

//=== Submodules ==========================================================

mod display_state;
mod event_mapper;
mod greeting;
mod window_host;

//=== External Crates =====================================================

use std::time::Duration;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    event_loop::EventLoop,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
};

//=== Internal Imports ====================================================

use crate::core::config::{WindowConfig, WindowGeometry};
use crate::core::platform_bridge::{Platform, PlatformError, PlatformEvent};
use window_host::WindowHost;

//=== Constants ===========================================================

/// Pumps to wait for `resumed()` before giving up on window creation.
const RESUME_ATTEMPTS: usize = 100;

/// Timeout of each of those pumps.
const RESUME_POLL_INTERVAL: Duration = Duration::from_millis(10);

//=== WinitPlatform =======================================================

/// Native window backend built on Winit.
///
/// # Lifecycle
///
/// 1. **Construction**: `WinitPlatform::new(sender)`, nothing opened yet
/// 2. **Creation**: `create_window()` opens the event loop and the window
/// 3. **Pumping**: `pump_messages()` dispatches pending messages
/// 4. **Teardown**: `destroy_window()` closes the window and the loop
///
/// # Thread Safety
///
/// Not Send/Sync; it must stay on the thread that created it.
pub struct WinitPlatform {
    /// None until the first window is requested, and after teardown.
    event_loop: Option<EventLoop<()>>,

    host: WindowHost,
}

impl WinitPlatform {
    //--- Construction -----------------------------------------------------

    /// Creates a backend that posts quit messages to `queue`.
    pub fn new(queue: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            event_loop: None,
            host: WindowHost::new(queue),
        }
    }

    /// Backend around an already opened event loop.
    #[cfg(test)]
    fn with_event_loop(queue: Sender<PlatformEvent>, event_loop: EventLoop<()>) -> Self {
        Self {
            event_loop: Some(event_loop),
            host: WindowHost::new(queue),
        }
    }
}

//=== Internal Helpers ====================================================

/// Runs one pump of `event_loop` with `timeout`.
///
/// If the loop itself asks to exit, that is forwarded as a posted quit.
fn pump_event_loop(event_loop: &mut EventLoop<()>, host: &mut WindowHost, timeout: Duration) {
    if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(timeout), host) {
        debug!(target: "platform", "Event loop exited with code {}", code);
        host.post_quit(code);
    }
}

/// Pumps until the host reports the outcome of its pending creation
/// request, at most `attempts` times.
///
/// On timeout the request is withdrawn so a late `resumed()` cannot
/// create an orphan window.
fn await_creation(
    host: &mut WindowHost,
    attempts: usize,
    mut pump: impl FnMut(&mut WindowHost),
) -> Result<WindowGeometry, PlatformError> {
    for attempt in 1..=attempts {
        pump(host);

        if let Some(result) = host.take_creation_result() {
            debug!(target: "platform", "Window creation resolved after {} pumps", attempt);
            return result;
        }
    }

    if host.creation_pending() {
        host.cancel_request();
    }
    Err(PlatformError::ResumeTimeout { pumps: attempts })
}

//=== Platform Implementation =============================================

impl Platform for WinitPlatform {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowGeometry, PlatformError> {
        self.host.request_window(config.clone())?;

        let mut event_loop = match self.event_loop.take() {
            Some(event_loop) => event_loop,
            None => {
                debug!(target: "platform", "Opening event loop");
                EventLoop::new().map_err(|e| {
                    self.host.cancel_request();
                    PlatformError::Registration(e)
                })?
            }
        };

        let result = await_creation(&mut self.host, RESUME_ATTEMPTS, |host| {
            pump_event_loop(&mut event_loop, host, RESUME_POLL_INTERVAL)
        });

        match result {
            Ok(geometry) => {
                self.event_loop = Some(event_loop);
                Ok(geometry)
            }
            Err(e) => {
                drop(event_loop);
                debug!(target: "platform", "Event loop closed after failed creation");
                Err(e)
            }
        }
    }

    fn pump_messages(&mut self) -> usize {
        if let Some(event_loop) = self.event_loop.as_mut() {
            pump_event_loop(event_loop, &mut self.host, Duration::ZERO);
        }
        self.host.take_dispatched()
    }

    fn destroy_window(&mut self) {
        self.host.destroy_window();

        if self.event_loop.take().is_some() {
            debug!(target: "platform", "Event loop closed");
        }
    }

    fn has_window(&self) -> bool {
        self.host.has_window()
    }

    fn cursor_visible(&self) -> bool {
        self.host.cursor_visible()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
