//=========================================================================
// Generic Engine — Library Root
//
// A single-window application shell: one native window, a cooperative
// message loop and a per-frame hook. Nothing is rendered beyond a fixed
// greeting; there is no input system or scene model.
//
// Responsibilities:
// - Expose the application controller (`Application`, `ApplicationBuilder`)
// - Keep the Winit backend (`platform`) internal, exposing only its type
// - Publish the platform-independent contracts under `core`
//
// Typical usage:
// ```no_run
// use generic_engine::ApplicationBuilder;
//
// let mut app = ApplicationBuilder::new().build();
// if app.initialize().is_ok() {
//     let _ = app.run();
// }
// app.shutdown();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds window configuration, the frame hook and the bridge
// contract a window backend implements.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window creation, message
// routing, painting). `engine` holds the lifecycle and the run loop.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Application, ApplicationBuilder, EngineError, Lifecycle, StopReason};
pub use platform::WinitPlatform;
