use crate::arch;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::instr::Op;
use crate::keyboard::Keyboard;
use crate::profile::Profile;
use crate::ram::Ram;
use crate::regs::RegMap;
use crate::timers::Timers;

/// Where the program counter goes after an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Next instruction.
    Advance,
    /// Skip the next instruction.
    Skip,
    /// Continue at the given address.
    JumpTo(u16),
    /// Execute the same instruction again next cycle.
    Blocked,
}

impl Flow {
    fn skip_if(cond: bool) -> Flow {
        if cond { Flow::Skip } else { Flow::Advance }
    }

    /// Program counter after leaving an instruction at `pc`.
    pub fn next_pc(self, pc: u16) -> u16 {
        let next = match self {
            Flow::Advance => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::JumpTo(addr) => addr,
            Flow::Blocked => pc,
        };
        next & arch::ADDR_MASK
    }
}

/// Everything outside the register file an operation may touch.
pub struct Bus<'a> {
    pub ram: &'a mut Ram,
    pub display: &'a mut Framebuffer,
    pub timers: &'a mut Timers,
    pub keyboard: &'a Keyboard,
    pub rnd: &'a mut oorandom::Rand32,
    pub profile: Profile,
}

/// Runs one decoded operation.
///
/// `regs.pc` holds the address of the instruction being executed; the
/// returned `Flow` says where it goes next. Operations that set VF write it
/// after their result, so a flag targeting VF itself keeps the flag.
pub fn execute(op: Op, regs: &mut RegMap, bus: &mut Bus<'_>) -> Result<Flow> {
    let flow = match op {
        Op::Sys(_) => Flow::Advance,

        Op::Cls => {
            bus.display.clear_screen();
            Flow::Advance
        },

        Op::Ret => {
            // The stack holds the address of the CALL, resume after it.
            let addr = regs.pop()?;
            Flow::JumpTo(addr.wrapping_add(2) & arch::ADDR_MASK)
        },

        Op::Jp(nnn) => Flow::JumpTo(nnn),

        Op::Call(nnn) => {
            regs.push(regs.pc)?;
            Flow::JumpTo(nnn)
        },

        Op::SeByte { x, kk } => Flow::skip_if(regs.vx[x] == kk),

        Op::SneByte { x, kk } => Flow::skip_if(regs.vx[x] != kk),

        Op::SeReg { x, y } => Flow::skip_if(regs.vx[x] == regs.vx[y]),

        Op::LdByte { x, kk } => {
            regs.vx[x] = kk;
            Flow::Advance
        },

        Op::AddByte { x, kk } => {
            regs.vx[x] = regs.vx[x].wrapping_add(kk);
            Flow::Advance
        },

        Op::LdReg { x, y } => {
            regs.vx[x] = regs.vx[y];
            Flow::Advance
        },

        Op::Or { x, y } => {
            regs.vx[x] |= regs.vx[y];
            Flow::Advance
        },

        Op::And { x, y } => {
            regs.vx[x] &= regs.vx[y];
            Flow::Advance
        },

        Op::Xor { x, y } => {
            regs.vx[x] ^= regs.vx[y];
            Flow::Advance
        },

        Op::AddReg { x, y } => {
            let (sum, carry) = regs.vx[x].overflowing_add(regs.vx[y]);
            regs.vx[x] = sum;
            regs.set_flag(carry);
            Flow::Advance
        },

        Op::Sub { x, y } => {
            let (vx, vy) = (regs.vx[x], regs.vx[y]);
            regs.vx[x] = vx.wrapping_sub(vy);
            regs.set_flag(vx > vy);
            Flow::Advance
        },

        Op::Shr { x, y } => {
            let src = if bus.profile.shift_uses_vy { regs.vx[y] } else { regs.vx[x] };
            regs.vx[x] = src >> 1;
            regs.set_flag(src & 0x01 != 0);
            Flow::Advance
        },

        Op::Subn { x, y } => {
            let (vx, vy) = (regs.vx[x], regs.vx[y]);
            regs.vx[x] = vy.wrapping_sub(vx);
            regs.set_flag(vy > vx);
            Flow::Advance
        },

        Op::Shl { x, y } => {
            let src = if bus.profile.shift_uses_vy { regs.vx[y] } else { regs.vx[x] };
            regs.vx[x] = src << 1;
            regs.set_flag(src & 0x80 != 0);
            Flow::Advance
        },

        Op::SneReg { x, y } => Flow::skip_if(regs.vx[x] != regs.vx[y]),

        Op::LdI(nnn) => {
            regs.set_i(nnn);
            Flow::Advance
        },

        Op::JpV0(nnn) => Flow::JumpTo((regs.vx[0u8] as u16 + nnn) & arch::ADDR_MASK),

        Op::Rnd { x, kk } => {
            let rnd = bus.rnd.rand_range(0..0x100) as u8;
            regs.vx[x] = rnd & kk;
            Flow::Advance
        },

        Op::Drw { x, y, n } => {
            let sprite = bus.ram.read_block(regs.i, n as usize);
            let collision = bus.display.draw_sprite(&sprite, regs.vx[x] as u32, regs.vx[y] as u32);
            regs.set_flag(collision);
            Flow::Advance
        },

        Op::Skp { x } => Flow::skip_if(bus.keyboard.key_down(regs.vx[x] & 0xF)),

        Op::Sknp { x } => Flow::skip_if(!bus.keyboard.key_down(regs.vx[x] & 0xF)),

        Op::LdVxDt { x } => {
            regs.vx[x] = bus.timers.get_delay();
            Flow::Advance
        },

        Op::LdVxK { x } => match bus.keyboard.any_key_down() {
            Some(key) => {
                regs.vx[x] = key;
                Flow::Advance
            },
            None => Flow::Blocked,
        },

        Op::LdDtVx { x } => {
            bus.timers.set_delay(regs.vx[x]);
            Flow::Advance
        },

        Op::LdStVx { x } => {
            bus.timers.set_sound(regs.vx[x]);
            Flow::Advance
        },

        Op::AddI { x } => {
            regs.set_i(regs.i + regs.vx[x] as u16);
            Flow::Advance
        },

        Op::LdF { x } => {
            regs.set_i(Ram::sprite_addr(regs.vx[x]));
            Flow::Advance
        },

        Op::LdB { x } => {
            let v = regs.vx[x];
            let bcd = [v / 100, (v / 10) % 10, v % 10];
            bus.ram.load_block_u8(regs.i, &bcd);
            Flow::Advance
        },

        Op::LdIVx { x } => {
            for r in 0..=x {
                bus.ram.write_u8(regs.i.wrapping_add(r as u16), regs.vx[r]);
            }
            if bus.profile.load_store_increments_i {
                regs.set_i(regs.i + x as u16 + 1);
            }
            Flow::Advance
        },

        Op::LdVxI { x } => {
            for r in 0..=x {
                regs.vx[r] = bus.ram.read_u8(regs.i.wrapping_add(r as u16));
            }
            if bus.profile.load_store_increments_i {
                regs.set_i(regs.i + x as u16 + 1);
            }
            Flow::Advance
        },
    };
    Ok(flow)
}
