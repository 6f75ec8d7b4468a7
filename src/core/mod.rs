//=========================================================================
// Core
//
// Platform-independent pieces of the shell: window configuration and
// placement policy, the frame hook, and the bridge contract the window
// backend implements.
//
//=========================================================================

pub mod config;
pub mod frame;
pub mod platform_bridge;

pub use config::{DisplayMode, Resolution, WindowConfig, WindowGeometry};
pub use frame::{FrameError, FrameHook, IdleFrame};
pub use platform_bridge::{Platform, PlatformError, PlatformEvent};
