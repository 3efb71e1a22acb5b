use std::sync::atomic::{AtomicU16, Ordering};

/// Down/up state of the 16 hex keys, one bit per key.
///
/// The host thread is the only writer, the CPU only queries.
#[derive(Debug, Default)]
pub struct Keyboard {
    keys: AtomicU16,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard {
            keys: AtomicU16::new(0),
        }
    }

    fn bit(key: u8) -> u16 {
        1u16 << (key & 0xF)
    }

    pub fn press(&self, key: u8) {
        self.keys.fetch_or(Self::bit(key), Ordering::Release);
    }

    pub fn release(&self, key: u8) {
        self.keys.fetch_and(!Self::bit(key), Ordering::Release);
    }

    pub fn release_all(&self) {
        self.keys.store(0, Ordering::Release);
    }

    /// Whether key `key & 0xF` is down.
    pub fn key_down(&self, key: u8) -> bool {
        self.keys.load(Ordering::Acquire) & Self::bit(key) != 0
    }

    /// Lowest key code currently down.
    pub fn any_key_down(&self) -> Option<u8> {
        match self.keys.load(Ordering::Acquire) {
            0 => None,
            keys => Some(keys.trailing_zeros() as u8),
        }
    }
}
