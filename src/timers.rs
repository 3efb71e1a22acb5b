use log::debug;

/// Delay and sound timers, counted down at 60 Hz by the host clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    dt: u8,
    st: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers { dt: 0, st: 0 }
    }

    pub fn get_delay(&self) -> u8 {
        self.dt
    }

    pub fn set_delay(&mut self, v: u8) {
        debug!("DT={}", v);
        self.dt = v;
    }

    pub fn get_sound(&self) -> u8 {
        self.st
    }

    pub fn set_sound(&mut self, v: u8) {
        debug!("ST={}", v);
        self.st = v;
    }

    pub fn is_sound_on(&self) -> bool {
        self.st > 0
    }

    /// One 60 Hz tick. Returns whether the beeper should sound during this
    /// tick.
    pub fn tick(&mut self) -> bool {
        let sound = self.is_sound_on();
        self.dt = self.dt.saturating_sub(1);
        self.st = self.st.saturating_sub(1);
        sound
    }
}
