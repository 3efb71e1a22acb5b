// Memory map.
pub const RAMSIZE: u32 = 4096;
pub const ADDR_MASK: u16 = 0x0FFF;
pub const FONT_START: u16 = 0x000;
pub const ROM_START: u16 = 0x200;

// CPU.
pub const NVREGS: u32 = 16;
pub const STACKSIZE: u32 = 16;

// Built-in hex font.
pub const NSPRITES: u32 = 16;
pub const SPRITE_HEIGHT: u16 = 5;

// Display.
pub const DISPLAY_WIDTH: u32 = 64;
pub const DISPLAY_HEIGHT: u32 = 32;

// Clocks.
pub const TIMER_HZ: u32 = 60;
pub const DEFAULT_CPU_HZ: u32 = 700;
pub const MIN_CPU_HZ: u32 = 60;
pub const MAX_CPU_HZ: u32 = 5000;
