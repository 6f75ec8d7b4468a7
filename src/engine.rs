//=========================================================================
// Application Controller
//
// Owns the top-level lifecycle: initialize → run → shutdown.
//
// Architecture:
// ```text
//     ApplicationBuilder  ──build()──>  Application  ──run()──>  [Loop]
//         │                                │
//         ├─ with_title()                  ├─ initialize(): create window
//         ├─ with_fullscreen()             ├─ run(): pump → drain → frame
//         ├─ with_windowed_size()          └─ shutdown(): tear down
//         ├─ with_idle_yield()
//         └─ with_frame_hook()
// ```
//
// Each loop iteration dispatches every pending platform message before
// the frame hook runs, so input is always handled before rendering work
// of the same iteration.
//
//=========================================================================

//=== Submodules ==========================================================

mod lifecycle;

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::{unbounded, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::{Resolution, WindowConfig, WindowGeometry};
use crate::core::frame::{FrameError, FrameHook, IdleFrame};
use crate::core::platform_bridge::{
    EventCollector, Platform, PlatformError, PlatformEvent, TickControl,
};
use crate::platform::WinitPlatform;

pub use lifecycle::Lifecycle;

//=== StopReason ==========================================================

/// Why [`Application::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The window posted a quit.
    Quit { exit_code: i32 },

    /// The frame hook failed.
    FrameFailed(FrameError),
}

impl StopReason {
    /// Process exit status for this outcome.
    ///
    /// A quit maps its code to a status: `0..=255` pass through, larger
    /// codes saturate at 255, and negative codes become 1 so they never
    /// read as success. A frame failure is 1.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Quit { exit_code } if *exit_code < 0 => 1,
            Self::Quit { exit_code } => u8::try_from(*exit_code).unwrap_or(u8::MAX),
            Self::FrameFailed(_) => 1,
        }
    }
}

//=== EngineError =========================================================

/// Errors surfaced by the application controller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The window backend failed to create the window.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A lifecycle operation was called in the wrong state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: Lifecycle,
    },
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and constructing an [`Application`].
///
/// # Default Values
///
/// - **Title**: "Generic Engine"
/// - **Fullscreen**: off
/// - **Windowed size**: 800x600
/// - **Idle yield**: on
/// - **Frame hook**: [`IdleFrame`]
///
/// # Examples
///
/// ```no_run
/// use generic_engine::ApplicationBuilder;
///
/// let mut app = ApplicationBuilder::new().with_fullscreen(true).build();
/// if app.initialize().is_ok() {
///     let _ = app.run();
/// }
/// app.shutdown();
/// ```
pub struct ApplicationBuilder {
    config: WindowConfig,
    idle_yield: bool,
    frame_hook: Box<dyn FrameHook>,
}

impl ApplicationBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: WindowConfig::default(),
            idle_yield: true,
            frame_hook: Box::new(IdleFrame),
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Covers the whole desktop at 32-bit color depth instead of opening a
    /// centered window.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    /// Sets the client area used when windowed.
    ///
    /// Default: 800x600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_windowed_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Windowed size must be positive, got {}x{}",
            width,
            height
        );
        self.config.windowed_size = Resolution::new(width, height);
        self
    }

    /// Yields the thread after an iteration that dispatched no messages.
    ///
    /// Turning this off gives a pure busy loop that keeps one core fully
    /// occupied.
    ///
    /// Default: true
    pub fn with_idle_yield(mut self, idle_yield: bool) -> Self {
        self.idle_yield = idle_yield;
        self
    }

    /// Installs the per-frame hook.
    pub fn with_frame_hook<H>(mut self, hook: H) -> Self
    where
        H: FrameHook + 'static,
    {
        self.frame_hook = Box::new(hook);
        self
    }

    /// Builds an application backed by a native winit window.
    pub fn build(self) -> Application<WinitPlatform> {
        self.build_with(WinitPlatform::new)
    }

    /// Builds an application on a custom window backend.
    ///
    /// `factory` receives the sender the backend's window callback posts
    /// quit messages to.
    pub fn build_with<P, F>(self, factory: F) -> Application<P>
    where
        P: Platform,
        F: FnOnce(Sender<PlatformEvent>) -> P,
    {
        info!(
            target: "engine",
            "Building application (\"{}\", fullscreen: {}, windowed: {}x{})",
            self.config.title,
            self.config.fullscreen,
            self.config.windowed_size.width,
            self.config.windowed_size.height
        );

        let (tx, rx) = unbounded();

        Application {
            config: self.config,
            platform: factory(tx),
            collector: EventCollector::new(rx),
            frame_hook: self.frame_hook,
            idle_yield: self.idle_yield,
            state: Lifecycle::Uninitialized,
            frames: 0,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Application =========================================================

/// The application controller.
///
/// Owns the window backend by value; the backend is never shared or
/// cloned, so the window is torn down exactly once. Dropping an
/// application that was not shut down shuts it down.
///
/// # Lifecycle
///
/// See [`Lifecycle`]. `shutdown()` may be called from any state and only
/// touches the window if one was actually created.
pub struct Application<P: Platform> {
    config: WindowConfig,
    platform: P,
    collector: EventCollector,
    frame_hook: Box<dyn FrameHook>,
    idle_yield: bool,
    state: Lifecycle,
    frames: u64,
}

impl<P: Platform> Application<P> {
    //--- Initialization ---------------------------------------------------

    /// Creates the window.
    ///
    /// On failure the application stays [`Lifecycle::Uninitialized`] and
    /// the caller decides whether to abort; `shutdown()` is still safe.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Platform`] if the backend could not create the window
    /// - [`EngineError::InvalidState`] unless the application is uninitialized
    pub fn initialize(&mut self) -> Result<WindowGeometry, EngineError> {
        if self.state != Lifecycle::Uninitialized {
            return Err(self.invalid_state("initialize"));
        }

        info!(target: "engine", "Initializing application");

        match self.platform.create_window(&self.config) {
            Ok(geometry) => {
                self.state = Lifecycle::Initialized;
                info!(
                    target: "engine",
                    "Window ready: {}x{} at ({}, {}), {:?}",
                    geometry.width,
                    geometry.height,
                    geometry.x,
                    geometry.y,
                    geometry.mode
                );
                Ok(geometry)
            }
            Err(e) => {
                error!(target: "engine", "Initialization failed: {}", e);
                Err(e.into())
            }
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the message loop until a quit is posted or a frame fails.
    ///
    /// # Loop
    ///
    /// 1. Dispatch all pending platform messages (non-blocking)
    /// 2. Drain posted messages; stop on quit
    /// 3. Run the frame hook; stop on failure
    /// 4. Yield if nothing was dispatched (when idle yield is on)
    ///
    /// An empty message queue never ends the loop.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] unless the application is initialized.
    pub fn run(&mut self) -> Result<StopReason, EngineError> {
        if self.state != Lifecycle::Initialized {
            return Err(self.invalid_state("run"));
        }

        self.state = Lifecycle::Running;
        info!(target: "engine", "Entering message loop");

        let reason = loop {
            //--- 1. Dispatch window messages -------------------------------
            let dispatched = self.platform.pump_messages();

            //--- 2. Check for posted quit ----------------------------------
            if let TickControl::Exit { exit_code } = self.collector.collect() {
                break StopReason::Quit { exit_code };
            }

            //--- 3. Frame work ---------------------------------------------
            if let Err(e) = self.frame() {
                break StopReason::FrameFailed(e);
            }

            //--- 4. Idle ---------------------------------------------------
            if dispatched == 0 && self.idle_yield {
                thread::yield_now();
            }
        };

        self.state = Lifecycle::Stopped;

        match &reason {
            StopReason::Quit { exit_code } => info!(
                target: "engine",
                "Message loop exited on quit (code {}) after {} frames",
                exit_code,
                self.frames
            ),
            StopReason::FrameFailed(e) => warn!(
                target: "engine",
                "Message loop exited after {} frames: {}",
                self.frames,
                e
            ),
        }

        Ok(reason)
    }

    /// Runs one frame of update/render work.
    pub fn frame(&mut self) -> Result<(), FrameError> {
        self.frames += 1;
        self.frame_hook.frame()
    }

    //--- Teardown ---------------------------------------------------------

    /// Asks the backend to tear down and marks the application destroyed.
    ///
    /// Runs from any state, including after a failed `initialize()`. Safe
    /// to call more than once; only the first call reaches the backend.
    pub fn shutdown(&mut self) {
        if self.state == Lifecycle::Destroyed {
            debug!(target: "engine", "Shutdown already complete");
            return;
        }

        info!(target: "engine", "Shutting down from {} state", self.state);

        // The backend guards the window itself; it must still release
        // whatever it opened even when creation failed.
        self.platform.destroy_window();

        self.state = Lifecycle::Destroyed;
        info!(target: "engine", "Shutdown complete");
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    //--- Internal Helpers -------------------------------------------------

    fn invalid_state(&self, operation: &'static str) -> EngineError {
        warn!(target: "engine", "Rejected {} while {}", operation, self.state);
        EngineError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

impl<P: Platform> Drop for Application<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
