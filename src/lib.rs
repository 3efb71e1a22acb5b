//! CHIP-8 interpreter core.
//!
//! [`chip::Chip`] runs the fetch/decode/execute cycle over [`ram::Ram`] and
//! [`regs::RegMap`]. Display, timers and keyboard are [`peripherals::Peripherals`],
//! shared with the host. [`clock`] drives the CPU and the 60 Hz timers as two
//! independent clocks.

pub mod arch;
pub mod chip;
pub mod clock;
pub mod error;
pub mod framebuffer;
pub mod instr;
pub mod keyboard;
pub mod ops;
pub mod peripherals;
pub mod profile;
pub mod ram;
pub mod regs;
pub mod timers;
pub mod util;

pub use chip::{Chip, State};
pub use error::Error;
pub use profile::Profile;
