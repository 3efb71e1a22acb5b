use log::info;

use crate::arch;
use crate::error::{Error, Result};
use crate::util;

type RamBuf = util::Array<u8, { arch::RAMSIZE as usize}>;

pub type Sprite = [u8; arch::SPRITE_HEIGHT as usize];

/// Built-in hex digits 0-F, 4 pixels wide, stored in the high nibble.
pub const FONT: [Sprite; arch::NSPRITES as usize] = [
    // 0x0
    [0b11110000,
     0b10010000,
     0b10010000,
     0b10010000,
     0b11110000],
    // 0x1
    [0b00100000,
     0b01100000,
     0b00100000,
     0b00100000,
     0b01110000],
    // 0x2
    [0b11110000,
     0b00010000,
     0b11110000,
     0b10000000,
     0b11110000],
    // 0x3
    [0b11110000,
     0b00010000,
     0b11110000,
     0b00010000,
     0b11110000],
    // 0x4
    [0b10010000,
     0b10010000,
     0b11110000,
     0b00010000,
     0b00010000],
    // 0x5
    [0b11110000,
     0b10000000,
     0b11110000,
     0b00010000,
     0b11110000],
    // 0x6
    [0b11110000,
     0b10000000,
     0b11110000,
     0b10010000,
     0b11110000],
    // 0x7
    [0b11110000,
     0b00010000,
     0b00100000,
     0b01000000,
     0b01000000],
    // 0x8
    [0b11110000,
     0b10010000,
     0b11110000,
     0b10010000,
     0b11110000],
    // 0x9
    [0b11110000,
     0b10010000,
     0b11110000,
     0b00010000,
     0b11110000],
    // 0xA
    [0b11110000,
     0b10010000,
     0b11110000,
     0b10010000,
     0b10010000],
    // 0xB
    [0b11100000,
     0b10010000,
     0b11100000,
     0b10010000,
     0b11100000],
    // 0xC
    [0b11110000,
     0b10000000,
     0b10000000,
     0b10000000,
     0b11110000],
    // 0xD
    [0b11100000,
     0b10010000,
     0b10010000,
     0b10010000,
     0b11100000],
    // 0xE
    [0b11110000,
     0b10000000,
     0b11110000,
     0b10000000,
     0b11110000],
    // 0xF
    [0b11110000,
     0b10000000,
     0b11110000,
     0b10000000,
     0b10000000],
];

/// 4 KiB of interpreter memory.
///
/// Addresses are 12 bits wide. Any wider value handed in is masked to
/// `0..0x1000` in every build profile, so an access past the end wraps to
/// the start of memory instead of touching anything else.
#[derive(Clone)]
pub struct Ram {
    mem: RamBuf,
}

impl Ram {
    /// Fresh memory with the hex font at `FONT_START`.
    pub fn new() -> Ram {
        let mut ram = Ram {
            mem: RamBuf::new(),
        };
        let mut addr = arch::FONT_START;
        for glyph in FONT.iter() {
            addr = ram.load_block_u8(addr, glyph);
        }
        ram
    }

    pub fn write_u8(&mut self, addr: u16, value: u8) {
        self.mem[addr & arch::ADDR_MASK] = value;
    }

    pub fn read_u8(&self, addr: u16) -> u8 {
        self.mem[addr & arch::ADDR_MASK]
    }

    /// Big-endian instruction word at `addr`.
    pub fn read_u16(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read_u8(addr), self.read_u8(addr.wrapping_add(1))])
    }

    pub fn write_u16(&mut self, addr: u16, v: u16) {
        let [hi, lo] = v.to_be_bytes();
        self.write_u8(addr, hi);
        self.write_u8(addr.wrapping_add(1), lo);
    }

    /// Copies `buf` to `addr` and returns the address just past it.
    pub fn load_block_u8(&mut self, addr: u16, buf: &[u8]) -> u16 {
        let mut addr = addr;
        for b in buf {
            self.write_u8(addr, *b);
            addr = addr.wrapping_add(1) & arch::ADDR_MASK;
        }
        addr
    }

    pub fn load_block_u16(&mut self, addr: u16, buf: &[u16]) {
        let mut addr = addr;
        for op in buf {
            self.write_u16(addr, *op);
            addr = addr.wrapping_add(2) & arch::ADDR_MASK;
        }
    }

    /// `len` bytes starting at `addr`, wrapping at the end of memory.
    pub fn read_block(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|off| self.read_u8(addr.wrapping_add(off as u16)))
            .collect()
    }

    /// Places a ROM image at `ROM_START`. Memory is untouched if it does not fit.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let max = (arch::RAMSIZE - arch::ROM_START as u32) as usize;
        if rom.len() > max {
            return Err(Error::RomTooLarge { size: rom.len(), max });
        }
        self.load_block_u8(arch::ROM_START, rom);
        info!("Loaded {} byte ROM at {:#05x}", rom.len(), arch::ROM_START);
        Ok(())
    }

    /// Address of the font glyph for hex digit `digit`.
    pub fn sprite_addr(digit: u8) -> u16 {
        (arch::FONT_START + digit as u16 * arch::SPRITE_HEIGHT) & arch::ADDR_MASK
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
