//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the posted-message queue once per loop iteration.
//
// Architecture:
//   window callback ──post──> Sender<PlatformEvent>
//                                   │
//   run loop ──collect()──> Receiver<PlatformEvent> → TickControl
//
// Draining never blocks. An empty queue always means "keep going".
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;

//=== TickControl =========================================================

/// Run loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit { exit_code: i32 },
}

//=== EventCollector ======================================================

/// Non-blocking reader of the posted-message queue.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    /// Drains every pending posted message.
    ///
    /// Returns [`TickControl::Exit`] with the first quit code seen. The
    /// rest of the queue is still drained so stale quits do not leak into
    /// a later run.
    pub(crate) fn collect(&mut self) -> TickControl {
        let mut control = TickControl::Continue;

        loop {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Quit { exit_code }) => {
                    trace!(target: "engine", "Quit posted (code {})", exit_code);
                    if control == TickControl::Continue {
                        control = TickControl::Exit { exit_code };
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "engine", "Message queue disconnected, treating as quit");
                    if control == TickControl::Continue {
                        control = TickControl::Exit { exit_code: 0 };
                    }
                    break;
                }
            }
        }

        control
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
