//=========================================================================
// Application Lifecycle
//=========================================================================
//
// ```text
//   Uninitialized ──initialize()──> Initialized ──run()──> Running
//        │                               │                    │
//        │                               │          quit / frame failure
//        │                               │                    ↓
//        └───────────shutdown()──────────┴──────────────── Stopped
//                        ↓ (from any state)
//                    Destroyed
// ```
//
//=========================================================================

use std::fmt;

/// Where an [`crate::Application`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Constructed; no window yet. Also the state after a failed
    /// `initialize()`.
    Uninitialized,

    /// The window exists; the loop has not started.
    Initialized,

    /// Inside `run()`.
    Running,

    /// `run()` returned after a quit or a frame failure.
    Stopped,

    /// `shutdown()` ran. Terminal.
    Destroyed,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}
