use thiserror::Error;

/// Faults that stop the interpreter.
///
/// None of these are transient: they mean the ROM is malformed or uses an
/// instruction set extension this machine does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid opcode {0:#06x}")]
    InvalidOpcode(u16),

    #[error("stack overflow: CALL with every stack slot in use")]
    StackOverflow,

    #[error("stack underflow: RET with an empty call stack")]
    StackUnderflow,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("CPU is halted")]
    Halted,
}

pub type Result<T> = std::result::Result<T, Error>;
