//! Event flags bridging interrupt tasks and the main task.
//!
//! Each [`Flag`] has exactly one writer (an interrupt task raising it once per
//! physical edge) and exactly one logical reader (the feature that currently
//! owns the input). There is no queue: raising a flag that is still pending
//! coalesces with the earlier event, so at most one event per flag is ever
//! outstanding.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

pub struct Flag {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Flag {
    pub const fn new() -> Self {
        Self { signal: Signal::new() }
    }

    /// Mark one event pending. Called from the interrupt side.
    pub fn raise(&self) {
        self.signal.signal(());
    }

    /// Consume the pending event, if any.
    pub fn take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Peek without consuming.
    pub fn is_raised(&self) -> bool {
        self.signal.signaled()
    }

}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

/// The full set of button flags on the shield.
///
/// `exit` doubles as the confirm button inside Guess-The-Number.
pub struct EventFlags {
    pub sw1: Flag,
    pub sw2: Flag,
    pub sw3: Flag,
    pub sw4: Flag,
    pub exit: Flag,
}

impl EventFlags {
    pub const fn new() -> Self {
        Self {
            sw1: Flag::new(),
            sw2: Flag::new(),
            sw3: Flag::new(),
            sw4: Flag::new(),
            exit: Flag::new(),
        }
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}
