//=========================================================================
// Frame Hook
//=========================================================================
//
// Per-iteration extension point for update/render work.
//
// The run loop calls the hook once per iteration, after all pending
// messages were dispatched. Returning an error ends the loop.
//
//=========================================================================

//=== FrameError ==========================================================

/// Failure reported by a frame hook. Ends the run loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("frame failed: {reason}")]
pub struct FrameError {
    reason: String,
}

impl FrameError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

//=== FrameHook ===========================================================

/// Work performed once per loop iteration.
///
/// Any `FnMut() -> Result<(), FrameError>` closure is a frame hook:
///
/// ```no_run
/// use generic_engine::ApplicationBuilder;
/// use generic_engine::core::frame::FrameError;
///
/// let mut remaining = 600;
/// let app = ApplicationBuilder::new()
///     .with_frame_hook(move || {
///         remaining -= 1;
///         if remaining == 0 {
///             return Err(FrameError::new("frame budget spent"));
///         }
///         Ok(())
///     })
///     .build();
/// ```
pub trait FrameHook {
    fn frame(&mut self) -> Result<(), FrameError>;
}

impl<F> FrameHook for F
where
    F: FnMut() -> Result<(), FrameError>,
{
    fn frame(&mut self) -> Result<(), FrameError> {
        self()
    }
}

//=== IdleFrame ===========================================================

/// Default hook: no update or render work yet, always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleFrame;

impl FrameHook for IdleFrame {
    fn frame(&mut self) -> Result<(), FrameError> {
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
