//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the application controller and a window backend.
//
// The controller drives the backend through `Platform`. The backend's
// window callback talks back only by posting `PlatformEvent`s onto the
// queue it was handed at construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::error::{EventLoopError, OsError};

//=== Internal Dependencies ===============================================

use crate::core::config::{WindowConfig, WindowGeometry};

//=== PlatformEvent =======================================================

/// Thread-level messages posted by the window callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The window was closed or destroyed; the run loop should stop.
    Quit { exit_code: i32 },
}

//=== PlatformError =======================================================

/// Window creation failures.
///
/// Winit's own errors are kept as the source; they carry whatever OS
/// detail the backend reports.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The windowing subsystem could not be opened.
    #[error("window registration failed: {0}")]
    Registration(#[source] EventLoopError),

    /// The window itself could not be created.
    #[error("error creating window: {0}")]
    WindowCreation(#[source] OsError),

    /// The event loop never became active, so no window could be created.
    #[error("event loop did not resume after {pumps} pumps")]
    ResumeTimeout { pumps: usize },

    /// A window is already live; only one is supported.
    #[error("a window already exists")]
    WindowExists,
}

//=== Platform ============================================================

/// A window backend driven by [`crate::Application`].
///
/// Implementations own at most one window. `pump_messages` must never
/// block: it dispatches whatever is pending and returns.
pub trait Platform {
    /// Creates, shows and focuses the window, and hides the cursor.
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowGeometry, PlatformError>;

    /// Dispatches every pending message to the window callback.
    ///
    /// Returns how many messages were dispatched.
    fn pump_messages(&mut self) -> usize;

    /// Tears the window down, if one exists, and releases whatever the
    /// backend opened to create it. Safe to call at any time, repeatedly.
    fn destroy_window(&mut self);

    /// Whether a window is currently live.
    fn has_window(&self) -> bool;

    /// Whether the pointer cursor is currently shown.
    fn cursor_visible(&self) -> bool;
}

//=========================================================================
// Unit Tests
//=========================================================================
