use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::framebuffer::Framebuffer;
use crate::keyboard::Keyboard;
use crate::timers::Timers;

/// State shared between the CPU thread and the host.
///
/// The pixel grid and the timers sit behind their own locks so the 60 Hz side
/// never sees a half-executed instruction. When both are needed the display
/// is locked first.
#[derive(Debug, Default)]
pub struct Peripherals {
    display: Mutex<Framebuffer>,
    timers: Mutex<Timers>,
    pub keyboard: Keyboard,
}

impl Peripherals {
    pub fn new() -> Self {
        Peripherals {
            display: Mutex::new(Framebuffer::new()),
            timers: Mutex::new(Timers::new()),
            keyboard: Keyboard::new(),
        }
    }

    // A panic while holding a lock leaves plain data behind, keep using it.
    pub fn display(&self) -> MutexGuard<'_, Framebuffer> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the pixel grid for rendering.
    pub fn snapshot(&self) -> Framebuffer {
        self.display().clone()
    }

    /// 60 Hz timer tick. Returns whether the beeper should sound.
    pub fn tick_timers(&self) -> bool {
        self.timers().tick()
    }
}
