use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info, trace, warn};

use crate::arch;
use crate::error::{Error, Result};
use crate::instr::Op;
use crate::ops::{self, Bus, Flow};
use crate::peripherals::Peripherals;
use crate::profile::Profile;
use crate::ram::Ram;
use crate::regs::RegMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// The CHIP-8 CPU: memory, registers and the fetch/decode/execute cycle.
///
/// Display, timers and keyboard live in [`Peripherals`], shared with the
/// host through an `Arc`.
pub struct Chip {
    ram: Ram,
    regs: RegMap,
    rnd: oorandom::Rand32,
    profile: Profile,
    peripherals: Arc<Peripherals>,
    state: State,
    rom: Vec<u8>,
    cycles: u64,
}

fn random_seed() -> u64 {
    let mut seed_bytes: [u8; 8] = [0u8; 8];
    match getrandom::getrandom(&mut seed_bytes) {
        Ok(()) => u64::from_le_bytes(seed_bytes),
        Err(e) => {
            warn!("No OS randomness ({}), seeding RND from the clock", e);
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        },
    }
}

impl Chip {
    pub fn new(profile: Profile) -> Chip {
        Chip::new_seed(random_seed(), profile)
    }

    /// Chip with a fixed RND seed, for reproducible runs.
    pub fn new_seed(seed: u64, profile: Profile) -> Chip {
        Chip {
            ram: Ram::new(),
            regs: RegMap::new(),
            rnd: oorandom::Rand32::new(seed),
            profile,
            peripherals: Arc::new(Peripherals::new()),
            state: State::Running,
            rom: Vec::new(),
            cycles: 0,
        }
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.ram.load_rom(rom)?;
        self.rom = rom.to_vec();
        Ok(())
    }

    /// Power cycle: registers, memory, screen and timers back to their initial
    /// state with the last ROM reloaded.
    pub fn reset(&mut self) {
        self.ram = Ram::new();
        // Size already checked by load_rom.
        self.ram.load_block_u8(arch::ROM_START, &self.rom);
        self.regs = RegMap::new();
        {
            let mut display = self.peripherals.display();
            let mut timers = self.peripherals.timers();
            display.clear_screen();
            timers.set_delay(0);
            timers.set_sound(0);
        }
        self.state = State::Running;
        info!("Reset");
    }

    pub fn peripherals(&self) -> Arc<Peripherals> {
        Arc::clone(&self.peripherals)
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.regs.set_pc(pc);
    }

    pub fn regs(&self) -> &RegMap {
        &self.regs
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Instructions executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn key_press(&self, key: u8) {
        self.peripherals.keyboard.press(key);
    }

    pub fn key_unpress(&self, key: u8) {
        self.peripherals.keyboard.release(key);
    }

    /// One 60 Hz timer tick, for hosts driving both clocks from one thread.
    pub fn cycle_timers(&self) -> bool {
        self.peripherals.tick_timers()
    }

    pub fn is_sound_on(&self) -> bool {
        self.peripherals.timers().is_sound_on()
    }

    /// Fetches, decodes and executes the instruction at PC, then moves PC.
    ///
    /// Any error halts the chip; every later call returns `Error::Halted`.
    pub fn cycle(&mut self) -> Result<Flow> {
        if self.state == State::Halted {
            return Err(Error::Halted);
        }
        let pc = self.regs.pc;
        self.step().map_err(|e| {
            error!("CPU halted at {:#05x}: {}", pc, e);
            self.state = State::Halted;
            e
        })
    }

    fn step(&mut self) -> Result<Flow> {
        let pc = self.regs.pc;
        let op = Op::decode(self.ram.read_u16(pc))?;
        trace!("[PC:0x{:04x}] {}", pc, op);

        let flow = {
            let mut display = self.peripherals.display();
            let mut timers = self.peripherals.timers();
            let mut bus = Bus {
                ram: &mut self.ram,
                display: &mut *display,
                timers: &mut *timers,
                keyboard: &self.peripherals.keyboard,
                rnd: &mut self.rnd,
                profile: self.profile,
            };
            ops::execute(op, &mut self.regs, &mut bus)?
        };

        self.regs.set_pc(flow.next_pc(pc));
        self.cycles += 1;
        Ok(flow)
    }
}
