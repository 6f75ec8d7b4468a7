//=========================================================================
// Window Host
//
// Owns the single native window and routes every message dispatched to
// it.
//
// Routing:
// ```text
//  Winit ──window_event()──> WindowMessage ──window_procedure()──┐
//                                                                │
//      Close / Destroy ──> post Quit on the message queue        │
//      Paint           ──> draw greeting into the surface  <─────┤
//      anything else   ──> WindowHost::handle_message()    <─────┘
// ```
//
// The event loop reaches the host through the `ApplicationHandler`
// receiver passed to each pump, so no process-wide pointer is needed.
// The host is not `Clone`: exactly one owner, one teardown.
//
//=========================================================================

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::rc::Rc;

use crossbeam_channel::Sender;
use log::*;
use softbuffer::{Context, SoftBufferError, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    monitor::{MonitorHandle, VideoModeHandle},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use super::display_state::DisplayState;
use super::event_mapper::{MessageResult, WindowMessage};
use super::greeting;
use crate::core::config::{DisplayMode, Resolution, WindowConfig, WindowGeometry};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};

type WindowSurface = Surface<Rc<Window>, Rc<Window>>;

//=== WindowResources =====================================================

/// Everything tied to the live window. Dropping it destroys the window.
struct WindowResources {
    /// Declared before `window`: the surface holds clones of the window
    /// handle and must go first.
    surface: Option<WindowSurface>,
    window: Rc<Window>,
}

//=== WindowHost ==========================================================

/// Owner of the native window and its message routing.
///
/// # Lifecycle
///
/// 1. `request_window(config)`: queue a creation request
/// 2. `resumed()` (called by Winit): create the window, store the result
/// 3. `take_creation_result()`: hand the result to the caller
/// 4. `window_event()`: route messages until teardown
/// 5. `destroy_window()`: restore cursor and display mode, drop the window
pub(crate) struct WindowHost {
    /// Posted-message queue read by the application controller.
    queue: Sender<PlatformEvent>,

    /// Creation request waiting for the event loop to resume.
    pending: Option<WindowConfig>,

    /// Outcome of the last creation request.
    creation: Option<Result<WindowGeometry, PlatformError>>,

    /// None until created, and again after teardown.
    resources: Option<WindowResources>,

    /// Cursor and display changes teardown must undo.
    display: DisplayState,

    /// Messages dispatched since the last `take_dispatched()`.
    dispatched: usize,
}

impl WindowHost {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(queue: Sender<PlatformEvent>) -> Self {
        Self {
            queue,
            pending: None,
            creation: None,
            resources: None,
            display: DisplayState::default(),
            dispatched: 0,
        }
    }

    //--- Creation ---------------------------------------------------------

    /// Queues a window creation for the next `resumed()` callback.
    ///
    /// Refused while a window is live; only one is supported.
    pub(crate) fn request_window(&mut self, config: WindowConfig) -> Result<(), PlatformError> {
        if self.resources.is_some() {
            return Err(PlatformError::WindowExists);
        }

        self.pending = Some(config);
        self.creation = None;
        Ok(())
    }

    /// Drops a creation request that was never serviced.
    pub(crate) fn cancel_request(&mut self) {
        self.pending = None;
    }

    pub(crate) fn take_creation_result(&mut self) -> Option<Result<WindowGeometry, PlatformError>> {
        self.creation.take()
    }

    /// Whether a request is still waiting for `resumed()`.
    pub(crate) fn creation_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<WindowGeometry, PlatformError> {
        if self.resources.is_some() {
            return Err(PlatformError::WindowExists);
        }

        //--- 1. Desktop resolution and placement ---------------------------
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());

        let desktop = match &monitor {
            Some(monitor) => {
                let size = monitor.size();
                Resolution::new(size.width, size.height)
            }
            None => {
                warn!(target: "platform", "No monitor reported, assuming desktop matches window size");
                config.windowed_size
            }
        };

        let geometry = WindowGeometry::resolve(config, desktop);

        //--- 2. Window attributes --------------------------------------------
        let mut attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(geometry.width, geometry.height))
            .with_visible(true);

        let mut display_mode_changed = false;

        match geometry.mode {
            DisplayMode::Fullscreen { color_depth } => {
                let exclusive = monitor
                    .as_ref()
                    .and_then(|monitor| exclusive_video_mode(monitor, desktop, color_depth));

                let fullscreen = match exclusive {
                    Some(mode) => {
                        debug!(
                            target: "platform",
                            "Switching display to {}x{} @ {} bpp",
                            desktop.width,
                            desktop.height,
                            color_depth
                        );
                        display_mode_changed = true;
                        Fullscreen::Exclusive(mode)
                    }
                    None => {
                        debug!(
                            target: "platform",
                            "No {} bpp video mode at desktop size, using borderless fullscreen",
                            color_depth
                        );
                        Fullscreen::Borderless(monitor.clone())
                    }
                };

                attrs = attrs.with_fullscreen(Some(fullscreen));
            }
            DisplayMode::Windowed => {
                attrs = attrs.with_position(PhysicalPosition::new(geometry.x, geometry.y));
            }
        }

        //--- 3. Create, show, focus ------------------------------------------
        let window = event_loop
            .create_window(attrs)
            .map_err(PlatformError::WindowCreation)?;
        let window = Rc::new(window);

        window.set_visible(true);
        window.focus_window();
        window.set_cursor_visible(false);

        //--- 4. Record what the window actually got -------------------------
        let actual = window.inner_size();
        let geometry = geometry.with_actual_size(Resolution::new(actual.width, actual.height));
        self.display.window_shown(&geometry, display_mode_changed);

        let surface = attach_surface(&window);

        info!(
            target: "platform",
            "Window created: \"{}\" {}x{} @ {}x DPI",
            config.title,
            geometry.width,
            geometry.height,
            window.scale_factor()
        );

        window.request_redraw();

        self.resources = Some(WindowResources { surface, window });

        Ok(geometry)
    }

    //--- Teardown ---------------------------------------------------------

    /// Restores the cursor and display mode, then destroys the window.
    ///
    /// A no-op when no window is live, so repeated calls are harmless.
    pub(crate) fn destroy_window(&mut self) {
        self.pending = None;
        self.creation = None;

        let restore = self.display.take_restore();

        let Some(resources) = self.resources.take() else {
            debug!(target: "platform", "No live window to destroy");
            return;
        };

        if restore.show_cursor {
            resources.window.set_cursor_visible(true);
        }

        if restore.leave_fullscreen {
            resources.window.set_fullscreen(None);
            if restore.revert_display_mode {
                debug!(target: "platform", "Display mode restored");
            }
        }

        let WindowResources { surface, window } = resources;
        drop(surface);
        drop(window);

        info!(target: "platform", "Window destroyed");
    }

    //--- Message Routing --------------------------------------------------

    /// Counts and routes one message through [`window_procedure`].
    pub(crate) fn dispatch(&mut self, message: WindowMessage) -> MessageResult {
        self.dispatched += 1;
        window_procedure(self, message)
    }

    /// Handles the messages the window procedure does not intercept.
    ///
    /// Key presses and releases are consumed here and nowhere else; input
    /// handling hooks in at these two arms.
    pub(crate) fn handle_message(&mut self, message: &WindowMessage) -> MessageResult {
        match message {
            WindowMessage::KeyDown(key) => {
                trace!(target: "platform::message", "Key down: {:?}", key);
                MessageResult::Handled
            }
            WindowMessage::KeyUp(key) => {
                trace!(target: "platform::message", "Key up: {:?}", key);
                MessageResult::Handled
            }
            _ => MessageResult::DefaultProcessing,
        }
    }

    /// Posts a quit for the application controller to pick up.
    pub(crate) fn post_quit(&self, exit_code: i32) {
        if self.queue.send(PlatformEvent::Quit { exit_code }).is_err() {
            warn!(target: "platform", "Message queue disconnected, quit dropped");
        }
    }

    /// Draws the greeting into the window surface, if there is one.
    fn paint(&mut self) {
        let Some(resources) = self.resources.as_mut() else {
            trace!(target: "platform::message", "Paint without a window ignored");
            return;
        };
        let Some(surface) = resources.surface.as_mut() else {
            return;
        };

        let size = resources.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized.
            return;
        };

        if let Err(e) = present_greeting(surface, width, height) {
            warn!(target: "platform", "Paint failed: {}", e);
        }
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn has_window(&self) -> bool {
        self.resources.is_some()
    }

    pub(crate) fn cursor_visible(&self) -> bool {
        self.display.cursor_visible()
    }

    /// Returns and resets the dispatched-message counter.
    pub(crate) fn take_dispatched(&mut self) -> usize {
        std::mem::take(&mut self.dispatched)
    }

    fn owns(&self, window_id: WindowId) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|resources| resources.window.id() == window_id)
    }
}

#[cfg(test)]
impl WindowHost {
    /// Resolves the pending request as `resumed()` would.
    pub(crate) fn resolve_request(&mut self, result: Result<WindowGeometry, PlatformError>) {
        self.pending = None;
        self.creation = Some(result);
    }
}

//=== Window Procedure ====================================================

/// Entry point for every message dispatched to the window.
///
/// Close and destroy post a quit, paint draws the greeting, everything
/// else goes to [`WindowHost::handle_message`].
pub(crate) fn window_procedure(host: &mut WindowHost, message: WindowMessage) -> MessageResult {
    match message {
        WindowMessage::Close | WindowMessage::Destroy => {
            debug!(target: "platform::message", "{:?}: posting quit", message);
            host.post_quit(0);
            MessageResult::Handled
        }
        WindowMessage::Paint => {
            host.paint();
            MessageResult::Handled
        }
        other => host.handle_message(&other),
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WindowHost {
    /// Services a pending creation request.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.pending.take() else {
            debug!(target: "platform", "Resumed with no creation pending");
            return;
        };

        let result = self.create_window(event_loop, &config);
        if let Err(e) = &result {
            error!(target: "platform", "Window creation failed: {}", e);
        }
        self.creation = Some(result);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.owns(window_id) {
            trace!(target: "platform::message", "Event for unknown window ignored");
            return;
        }

        let message = WindowMessage::from(&event);
        let result = self.dispatch(message);
        trace!(target: "platform::message", "{:?} -> {:?}", message, result);
    }
}

//=== Internal Helpers ====================================================

/// Best video mode matching the desktop size at the requested depth.
fn exclusive_video_mode(
    monitor: &MonitorHandle,
    desktop: Resolution,
    color_depth: u16,
) -> Option<VideoModeHandle> {
    let size = PhysicalSize::new(desktop.width, desktop.height);
    monitor
        .video_modes()
        .filter(|mode| mode.bit_depth() == color_depth && mode.size() == size)
        .max_by_key(|mode| mode.refresh_rate_millihertz())
}

/// Creates the software surface paint draws into. A window without one
/// still works; it just stays blank.
fn attach_surface(window: &Rc<Window>) -> Option<WindowSurface> {
    let context = match Context::new(Rc::clone(window)) {
        Ok(context) => context,
        Err(e) => {
            warn!(target: "platform", "Software surface unavailable: {}", e);
            return None;
        }
    };

    match Surface::new(&context, Rc::clone(window)) {
        Ok(surface) => Some(surface),
        Err(e) => {
            warn!(target: "platform", "Software surface unavailable: {}", e);
            None
        }
    }
}

fn present_greeting(
    surface: &mut WindowSurface,
    width: NonZeroU32,
    height: NonZeroU32,
) -> Result<(), SoftBufferError> {
    surface.resize(width, height)?;
    let mut buffer = surface.buffer_mut()?;
    greeting::paint_greeting(&mut buffer, width.get(), height.get());
    buffer.present()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn host() -> (WindowHost, Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (WindowHost::new(tx), rx)
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn new_host_has_no_window() {
        let (host, _rx) = host();
        assert!(!host.has_window());
        assert!(host.cursor_visible());
    }

    #[test]
    fn creation_result_starts_empty() {
        let (mut host, _rx) = host();
        host.request_window(WindowConfig::default()).unwrap();
        assert!(host.take_creation_result().is_none());
        assert!(host.creation_pending());
        host.cancel_request();
        assert!(!host.creation_pending());
    }

    #[test]
    fn new_request_clears_stale_result() {
        let (mut host, _rx) = host();
        host.request_window(WindowConfig::default()).unwrap();
        host.resolve_request(Err(PlatformError::WindowExists));

        host.request_window(WindowConfig::default()).unwrap();

        assert!(host.take_creation_result().is_none());
        assert!(host.creation_pending());
    }

    //=====================================================================
    // handle_message
    //=====================================================================

    #[test]
    fn key_messages_are_consumed() {
        let (mut host, _rx) = host();
        let key = PhysicalKey::Code(KeyCode::Space);

        assert_eq!(host.handle_message(&WindowMessage::KeyDown(key)), MessageResult::Handled);
        assert_eq!(host.handle_message(&WindowMessage::KeyUp(key)), MessageResult::Handled);
    }

    #[test]
    fn other_messages_get_default_processing() {
        let (mut host, _rx) = host();
        assert_eq!(
            host.handle_message(&WindowMessage::Other),
            MessageResult::DefaultProcessing
        );
    }

    //=====================================================================
    // window_procedure
    //=====================================================================

    #[test]
    fn close_posts_quit() {
        let (mut host, rx) = host();

        let result = window_procedure(&mut host, WindowMessage::Close);

        assert_eq!(result, MessageResult::Handled);
        assert_eq!(rx.try_recv(), Ok(PlatformEvent::Quit { exit_code: 0 }));
    }

    #[test]
    fn destroy_posts_quit() {
        let (mut host, rx) = host();

        window_procedure(&mut host, WindowMessage::Destroy);

        assert_eq!(rx.try_recv(), Ok(PlatformEvent::Quit { exit_code: 0 }));
    }

    #[test]
    fn paint_without_window_is_handled_quietly() {
        let (mut host, rx) = host();

        assert_eq!(window_procedure(&mut host, WindowMessage::Paint), MessageResult::Handled);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn keys_and_others_are_forwarded() {
        let (mut host, rx) = host();
        let key = PhysicalKey::Code(KeyCode::Escape);

        assert_eq!(
            window_procedure(&mut host, WindowMessage::KeyDown(key)),
            MessageResult::Handled
        );
        assert_eq!(
            window_procedure(&mut host, WindowMessage::Other),
            MessageResult::DefaultProcessing
        );
        assert!(rx.try_recv().is_err(), "Only close/destroy may post quit");
    }

    #[test]
    fn post_quit_survives_disconnected_queue() {
        let (host, rx) = host();
        drop(rx);
        host.post_quit(0);
    }

    //=====================================================================
    // Dispatch Counting
    //=====================================================================

    #[test]
    fn dispatch_counts_messages() {
        let (mut host, _rx) = host();

        host.dispatch(WindowMessage::Other);
        host.dispatch(WindowMessage::Paint);
        host.dispatch(WindowMessage::KeyUp(PhysicalKey::Code(KeyCode::KeyA)));

        assert_eq!(host.take_dispatched(), 3);
        assert_eq!(host.take_dispatched(), 0);
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn destroy_without_window_is_noop() {
        let (mut host, rx) = host();

        host.destroy_window();

        assert!(!host.has_window());
        assert!(host.cursor_visible());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn destroy_twice_does_not_crash() {
        let (mut host, _rx) = host();
        host.request_window(WindowConfig::default()).unwrap();

        host.destroy_window();
        host.destroy_window();

        assert!(!host.has_window());
        assert!(host.pending.is_none());
    }
}
