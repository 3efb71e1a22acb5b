use std::fmt;

use crate::error::{Error, Result};

/// Operand fields of a raw instruction word, split by the fixed masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instr {
    pub opcode: u16,
    pub c: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub kk: u8,
    pub nnn: u16,
}

impl Instr {
    pub fn new(opcode: u16) -> Self {
        Instr {
            opcode,
            c: ((opcode & 0xf000) >> 12) as u8,
            x: ((opcode & 0x0f00) >> 8) as u8,
            y: ((opcode & 0x00f0) >> 4) as u8,
            n: (opcode & 0x000f) as u8,
            kk: (opcode & 0x00ff) as u8,
            nnn: opcode & 0x0fff,
        }
    }
}

/// A decoded instruction with its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// 0nnn, machine code routine on the original hardware. Ignored.
    Sys(u16),
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SeByte { x: u8, kk: u8 },
    /// 4xkk
    SneByte { x: u8, kk: u8 },
    /// 5xy0
    SeReg { x: u8, y: u8 },
    /// 6xkk
    LdByte { x: u8, kk: u8 },
    /// 7xkk
    AddByte { x: u8, kk: u8 },
    /// 8xy0
    LdReg { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8, y: u8 },
    /// 8xy7
    Subn { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8, y: u8 },
    /// 9xy0
    SneReg { x: u8, y: u8 },
    /// Annn
    LdI(u16),
    /// Bnnn
    JpV0(u16),
    /// Cxkk
    Rnd { x: u8, kk: u8 },
    /// Dxyn
    Drw { x: u8, y: u8, n: u8 },
    /// Ex9E
    Skp { x: u8 },
    /// ExA1
    Sknp { x: u8 },
    /// Fx07
    LdVxDt { x: u8 },
    /// Fx0A
    LdVxK { x: u8 },
    /// Fx15
    LdDtVx { x: u8 },
    /// Fx18
    LdStVx { x: u8 },
    /// Fx1E
    AddI { x: u8 },
    /// Fx29
    LdF { x: u8 },
    /// Fx33
    LdB { x: u8 },
    /// Fx55
    LdIVx { x: u8 },
    /// Fx65
    LdVxI { x: u8 },
}

impl Op {
    /// Maps an instruction word to its operation.
    ///
    /// Dispatch is on the top nibble; families `0`, `5`, `8`, `9`, `E` and `F`
    /// are further split on the low nibble or low byte. Anything outside the
    /// table is `Error::InvalidOpcode`.
    pub fn decode(opcode: u16) -> Result<Op> {
        let op = match Instr::new(opcode) {
            Instr { opcode: 0x00E0, .. } => Op::Cls,
            Instr { opcode: 0x00EE, .. } => Op::Ret,
            Instr { c: 0x0, nnn, .. } => Op::Sys(nnn),
            Instr { c: 0x1, nnn, .. } => Op::Jp(nnn),
            Instr { c: 0x2, nnn, .. } => Op::Call(nnn),
            Instr { c: 0x3, x, kk, .. } => Op::SeByte { x, kk },
            Instr { c: 0x4, x, kk, .. } => Op::SneByte { x, kk },
            Instr { c: 0x5, x, y, n: 0x0, .. } => Op::SeReg { x, y },
            Instr { c: 0x6, x, kk, .. } => Op::LdByte { x, kk },
            Instr { c: 0x7, x, kk, .. } => Op::AddByte { x, kk },
            Instr { c: 0x8, x, y, n, .. } => match n {
                0x0 => Op::LdReg { x, y },
                0x1 => Op::Or { x, y },
                0x2 => Op::And { x, y },
                0x3 => Op::Xor { x, y },
                0x4 => Op::AddReg { x, y },
                0x5 => Op::Sub { x, y },
                0x6 => Op::Shr { x, y },
                0x7 => Op::Subn { x, y },
                0xE => Op::Shl { x, y },
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            Instr { c: 0x9, x, y, n: 0x0, .. } => Op::SneReg { x, y },
            Instr { c: 0xA, nnn, .. } => Op::LdI(nnn),
            Instr { c: 0xB, nnn, .. } => Op::JpV0(nnn),
            Instr { c: 0xC, x, kk, .. } => Op::Rnd { x, kk },
            Instr { c: 0xD, x, y, n, .. } => Op::Drw { x, y, n },
            Instr { c: 0xE, x, kk: 0x9E, .. } => Op::Skp { x },
            Instr { c: 0xE, x, kk: 0xA1, .. } => Op::Sknp { x },
            Instr { c: 0xF, x, kk, .. } => match kk {
                0x07 => Op::LdVxDt { x },
                0x0A => Op::LdVxK { x },
                0x15 => Op::LdDtVx { x },
                0x18 => Op::LdStVx { x },
                0x1E => Op::AddI { x },
                0x29 => Op::LdF { x },
                0x33 => Op::LdB { x },
                0x55 => Op::LdIVx { x },
                0x65 => Op::LdVxI { x },
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            _ => return Err(Error::InvalidOpcode(opcode)),
        };
        Ok(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Sys(nnn) => write!(f, "SYS {:#x}", nnn),
            Op::Cls => write!(f, "CLS"),
            Op::Ret => write!(f, "RET"),
            Op::Jp(nnn) => write!(f, "JP {:#x}", nnn),
            Op::Call(nnn) => write!(f, "CALL {:#x}", nnn),
            Op::SeByte { x, kk } => write!(f, "SE V{:X}, {:#x}", x, kk),
            Op::SneByte { x, kk } => write!(f, "SNE V{:X}, {:#x}", x, kk),
            Op::SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Op::LdByte { x, kk } => write!(f, "LD V{:X}, {:#x}", x, kk),
            Op::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#x}", x, kk),
            Op::LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Op::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Op::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Op::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Op::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Op::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Op::Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Op::Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Op::Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Op::SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Op::LdI(nnn) => write!(f, "LD I, {:#x}", nnn),
            Op::JpV0(nnn) => write!(f, "JP V0, {:#x}", nnn),
            Op::Rnd { x, kk } => write!(f, "RND V{:X}, {:#x}", x, kk),
            Op::Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#x}", x, y, n),
            Op::Skp { x } => write!(f, "SKP V{:X}", x),
            Op::Sknp { x } => write!(f, "SKNP V{:X}", x),
            Op::LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            Op::LdVxK { x } => write!(f, "LD V{:X}, K", x),
            Op::LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            Op::LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            Op::AddI { x } => write!(f, "ADD I, V{:X}", x),
            Op::LdF { x } => write!(f, "LD F, V{:X}", x),
            Op::LdB { x } => write!(f, "LD B, V{:X}", x),
            Op::LdIVx { x } => write!(f, "LD [I], V{:X}", x),
            Op::LdVxI { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
