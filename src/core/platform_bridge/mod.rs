//=========================================================================
// Platform Bridge
//=========================================================================
//
// Seam between the application controller and the window backend.
//
// Components:
// - `interface`: the `Platform` trait, posted events and errors
// - `event_collector`: controller-side draining of posted events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{Platform, PlatformError, PlatformEvent};
