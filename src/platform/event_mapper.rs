//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events into the shell's `WindowMessage`s, the
// unit the window procedure routes on.
//
// Responsibilities:
// - Separate close and destroy requests from everything else
// - Treat `RedrawRequested` as the paint message
// - Split keyboard input into key-down and key-up
// - Fold every other event into `Other`
//
//=========================================================================

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::PhysicalKey;

//=== WindowMessage =======================================================

/// One message dispatched to the window. Consumed within the pump that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowMessage {
    /// The user asked to close the window (close button, Alt+F4, ...).
    Close,

    /// The OS destroyed the window.
    Destroy,

    /// The window contents must be redrawn.
    Paint,

    KeyDown(PhysicalKey),
    KeyUp(PhysicalKey),

    /// Anything else: resize, focus, pointer motion, ...
    Other,
}

//=== MessageResult =======================================================

/// Outcome of routing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageResult {
    /// The message was consumed.
    Handled,

    /// Left to the platform's default behavior.
    DefaultProcessing,
}

//=== Event Conversion ====================================================

impl From<&WindowEvent> for WindowMessage {
    fn from(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => Self::Close,
            WindowEvent::Destroyed => Self::Destroy,
            WindowEvent::RedrawRequested => Self::Paint,

            //--- Keyboard Input ------------------------------------------
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key,
                    state,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => Self::KeyDown(*physical_key),
                ElementState::Released => Self::KeyUp(*physical_key),
            },

            _ => Self::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn close_requested_maps_to_close() {
        assert_eq!(
            WindowMessage::from(&WindowEvent::CloseRequested),
            WindowMessage::Close
        );
    }

    #[test]
    fn destroyed_maps_to_destroy() {
        assert_eq!(
            WindowMessage::from(&WindowEvent::Destroyed),
            WindowMessage::Destroy
        );
    }

    #[test]
    fn redraw_maps_to_paint() {
        assert_eq!(
            WindowMessage::from(&WindowEvent::RedrawRequested),
            WindowMessage::Paint
        );
    }

    #[test]
    fn unrelated_events_map_to_other() {
        let events = [
            WindowEvent::Focused(true),
            WindowEvent::Resized(PhysicalSize::new(1024, 768)),
            WindowEvent::Occluded(false),
        ];

        for event in &events {
            assert_eq!(WindowMessage::from(event), WindowMessage::Other);
        }
    }
}
