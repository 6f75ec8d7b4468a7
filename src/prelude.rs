//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use generic_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application controller
pub use crate::engine::{Application, ApplicationBuilder, EngineError, Lifecycle, StopReason};

// Window configuration
pub use crate::core::config::{DisplayMode, Resolution, WindowConfig, WindowGeometry};

// Frame hook
pub use crate::core::frame::{FrameError, FrameHook, IdleFrame};

// Backend contract
pub use crate::core::platform_bridge::{Platform, PlatformError, PlatformEvent};
