use crate::arch;
use crate::error::{Error, Result};
use crate::util;

type VxRegs = util::Array<u8, {arch::NVREGS as usize}>;
type Stack = util::Array<u16, {arch::STACKSIZE as usize}>;

/// Register file of the interpreter.
///
/// `i` and `pc` are 12-bit addresses and are always stored masked.
/// `sp` counts the occupied stack slots, `0..=STACKSIZE`.
#[derive(Clone, Debug, PartialEq)]
pub struct RegMap {
    pub vx: VxRegs,
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: Stack,
}

impl RegMap {
    pub fn new() -> Self {
        RegMap {
            vx: VxRegs::new(),
            i: 0,
            pc: arch::ROM_START,
            sp: 0,
            stack: Stack::new(),
        }
    }

    pub fn set_i(&mut self, addr: u16) {
        self.i = addr & arch::ADDR_MASK;
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr & arch::ADDR_MASK;
    }

    /// VF, the carry/borrow/collision flag.
    pub fn set_flag(&mut self, set: bool) {
        self.vx[0xF_u8] = set as u8;
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp as u32 >= arch::STACKSIZE {
            return Err(Error::StackOverflow);
        }
        self.stack[self.sp] = addr & arch::ADDR_MASK;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }
}

impl Default for RegMap {
    fn default() -> Self {
        Self::new()
    }
}
