//=========================================================================
// Display State
//
// Tracks the changes window creation makes outside the window itself
// (hidden cursor, fullscreen, display mode) so teardown undoes exactly
// those, once.
//
//=========================================================================

use crate::core::config::WindowGeometry;

//=== Restore =============================================================

/// What teardown has to undo on the window before dropping it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Restore {
    pub(crate) show_cursor: bool,
    pub(crate) leave_fullscreen: bool,
    pub(crate) revert_display_mode: bool,
}

//=== DisplayState ========================================================

#[derive(Debug, Default)]
pub(crate) struct DisplayState {
    cursor_hidden: bool,
    fullscreen: bool,
    display_mode_changed: bool,
}

impl DisplayState {
    /// Records a freshly shown window: cursor hidden, and fullscreen
    /// (with or without an exclusive video mode) per `geometry`.
    pub(crate) fn window_shown(&mut self, geometry: &WindowGeometry, display_mode_changed: bool) {
        self.cursor_hidden = true;
        self.fullscreen = geometry.is_fullscreen();
        self.display_mode_changed = self.fullscreen && display_mode_changed;
    }

    /// Returns what must be undone and resets to the untouched state.
    ///
    /// A second call returns an empty [`Restore`].
    pub(crate) fn take_restore(&mut self) -> Restore {
        let restore = Restore {
            show_cursor: self.cursor_hidden,
            leave_fullscreen: self.fullscreen,
            revert_display_mode: self.display_mode_changed,
        };
        *self = Self::default();
        restore
    }

    pub(crate) fn cursor_visible(&self) -> bool {
        !self.cursor_hidden
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Resolution, WindowConfig};

    fn geometry(fullscreen: bool) -> WindowGeometry {
        let config = WindowConfig {
            fullscreen,
            ..WindowConfig::default()
        };
        WindowGeometry::resolve(&config, Resolution::new(1920, 1080))
    }

    #[test]
    fn untouched_state_restores_nothing() {
        let mut state = DisplayState::default();

        assert!(state.cursor_visible());
        assert_eq!(state.take_restore(), Restore::default());
    }

    #[test]
    fn windowed_teardown_restores_cursor_only() {
        let mut state = DisplayState::default();
        state.window_shown(&geometry(false), false);
        assert!(!state.cursor_visible());

        let restore = state.take_restore();

        assert_eq!(
            restore,
            Restore {
                show_cursor: true,
                leave_fullscreen: false,
                revert_display_mode: false,
            }
        );
        assert!(state.cursor_visible());
    }

    #[test]
    fn fullscreen_teardown_leaves_fullscreen_and_reverts_mode() {
        let mut state = DisplayState::default();
        state.window_shown(&geometry(true), true);

        let restore = state.take_restore();

        assert!(restore.show_cursor);
        assert!(restore.leave_fullscreen);
        assert!(restore.revert_display_mode);
    }

    #[test]
    fn borderless_fullscreen_has_no_mode_to_revert() {
        let mut state = DisplayState::default();
        state.window_shown(&geometry(true), false);

        let restore = state.take_restore();

        assert!(restore.leave_fullscreen);
        assert!(!restore.revert_display_mode);
    }

    #[test]
    fn windowed_never_reverts_display_mode() {
        let mut state = DisplayState::default();
        state.window_shown(&geometry(false), true);

        assert!(!state.take_restore().revert_display_mode);
    }

    #[test]
    fn second_teardown_restores_nothing() {
        let mut state = DisplayState::default();
        state.window_shown(&geometry(true), true);

        state.take_restore();

        assert_eq!(state.take_restore(), Restore::default());
        assert!(state.cursor_visible());
    }

    #[test]
    fn create_destroy_cycles_restore_each_time() {
        let mut state = DisplayState::default();

        state.window_shown(&geometry(true), true);
        assert!(state.take_restore().leave_fullscreen);

        state.window_shown(&geometry(false), false);
        let restore = state.take_restore();
        assert!(restore.show_cursor);
        assert!(!restore.leave_fullscreen);

        assert_eq!(state.take_restore(), Restore::default());
    }
}
