use rand::{Rng, RngCore};

use crate::config::Quirks;
use crate::constants::{OPCODE_SIZE, SPRITE_HEIGHT, SPRITE_SHEET_ADDR};
use crate::error::{Chip8Error, Result};
use crate::keypad::Keypad;
use crate::state::State;

/// Where the program counter goes once an operation has run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramCounter {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> Self {
        if condition {
            ProgramCounter::Skip
        } else {
            ProgramCounter::Next
        }
    }

    /// The program counter that follows `pc`
    pub fn apply(self, pc: u16) -> u16 {
        match self {
            ProgramCounter::Next => pc.wrapping_add(OPCODE_SIZE),
            ProgramCounter::Skip => pc.wrapping_add(OPCODE_SIZE * 2),
            ProgramCounter::Jump(addr) => addr,
        }
    }
}

/// Everything outside of `State` that an operation may consult
pub struct Peripherals<'a> {
    pub keys: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// no-op; used to call native routines on the original hardware
pub fn sys(_addr: u16) -> ProgramCounter {
    ProgramCounter::Next
}

/// clear
pub fn clr(state: &mut State) -> ProgramCounter {
    state.frame_buffer.clear();
    state.draw_flag = true;
    ProgramCounter::Next
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<ProgramCounter> {
    let addr = state
        .stack
        .pop()
        .ok_or(Chip8Error::StackUnderflow { addr: state.pc })?;
    Ok(ProgramCounter::Jump(addr))
}

/// PC = addr
pub fn jump(addr: u16) -> ProgramCounter {
    ProgramCounter::Jump(addr)
}

/// STACK.push(PC + 2); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<ProgramCounter> {
    let ret = ProgramCounter::Next.apply(state.pc);
    state
        .stack
        .push(ret)
        .map_err(|_| Chip8Error::StackOverflow { addr: state.pc })?;
    Ok(ProgramCounter::Jump(addr))
}

/// if Vx == kk then pc += 2
pub fn ske(state: &State, x: u8, kk: u8) -> ProgramCounter {
    ProgramCounter::skip_if(state.v[x as usize] == kk)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &State, x: u8, kk: u8) -> ProgramCounter {
    ProgramCounter::skip_if(state.v[x as usize] != kk)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> ProgramCounter {
    ProgramCounter::skip_if(state.v[x as usize] == state.v[y as usize])
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> ProgramCounter {
    state.v[x as usize] = kk;
    ProgramCounter::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) -> ProgramCounter {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    ProgramCounter::Next
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] = state.v[y as usize];
    ProgramCounter::Next
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] |= state.v[y as usize];
    ProgramCounter::Next
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] &= state.v[y as usize];
    ProgramCounter::Next
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] ^= state.v[y as usize];
    ProgramCounter::Next
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = u8::from(over);
    ProgramCounter::Next
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = u8::from(!under);
    ProgramCounter::Next
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &mut State, x: u8, y: u8, quirks: Quirks) -> ProgramCounter {
    let src = if quirks.shift_uses_vy { y } else { x };
    let value = state.v[src as usize];
    state.v[x as usize] = value >> 1;
    state.v[0xF] = value & 0x1;
    ProgramCounter::Next
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = u8::from(!under);
    ProgramCounter::Next
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &mut State, x: u8, y: u8, quirks: Quirks) -> ProgramCounter {
    let src = if quirks.shift_uses_vy { y } else { x };
    let value = state.v[src as usize];
    state.v[x as usize] = value << 1;
    state.v[0xF] = value >> 7;
    ProgramCounter::Next
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &State, x: u8, y: u8) -> ProgramCounter {
    ProgramCounter::skip_if(state.v[x as usize] != state.v[y as usize])
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> ProgramCounter {
    state.i = addr;
    ProgramCounter::Next
}

/// PC = V0 + addr
/// The sum may exceed 12 bits; it is masked when the next opcode is fetched
pub fn jumpi(state: &State, addr: u16) -> ProgramCounter {
    ProgramCounter::Jump(u16::from(state.v[0x0]) + addr)
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) -> ProgramCounter {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    ProgramCounter::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> ProgramCounter {
    let mut buffer = [0u8; 15];
    let sprite = &mut buffer[..n as usize];
    for (row, byte) in sprite.iter_mut().enumerate() {
        *byte = state.memory.read(state.i.wrapping_add(row as u16));
    }

    let vx = state.v[x as usize] as usize;
    let vy = state.v[y as usize] as usize;
    let collision = state.frame_buffer.draw_sprite(vx, vy, sprite);

    state.v[0xF] = u8::from(collision);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8, keys: &Keypad) -> ProgramCounter {
    ProgramCounter::skip_if(keys.is_pressed(state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8, keys: &Keypad) -> ProgramCounter {
    ProgramCounter::skip_if(!keys.is_pressed(state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> ProgramCounter {
    state.v[x as usize] = state.timers.delay;
    ProgramCounter::Next
}

/// await keypress for Vx
/// Keys already held don't count; they have to be released and pressed again
pub fn keyd(state: &mut State, x: u8, keys: &Keypad) -> ProgramCounter {
    state.register_needing_key = Some(x);
    state.held_keys = *keys;
    ProgramCounter::Next
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> ProgramCounter {
    state.timers.delay = state.v[x as usize];
    ProgramCounter::Next
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> ProgramCounter {
    state.timers.sound = state.v[x as usize];
    ProgramCounter::Next
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) -> ProgramCounter {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    ProgramCounter::Next
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) -> ProgramCounter {
    state.i = SPRITE_SHEET_ADDR + u16::from(state.v[x as usize]) * SPRITE_HEIGHT;
    ProgramCounter::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> ProgramCounter {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.memory.write(state.i.wrapping_add(offset as u16), *digit);
    }
    ProgramCounter::Next
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8, quirks: Quirks) -> ProgramCounter {
    for r in 0..=x {
        state
            .memory
            .write(state.i.wrapping_add(u16::from(r)), state.v[r as usize]);
    }
    if quirks.load_store_increments_i {
        state.i = state.i.wrapping_add(u16::from(x) + 1);
    }
    ProgramCounter::Next
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8, quirks: Quirks) -> ProgramCounter {
    for r in 0..=x {
        state.v[r as usize] = state.memory.read(state.i.wrapping_add(u16::from(r)));
    }
    if quirks.load_store_increments_i {
        state.i = state.i.wrapping_add(u16::from(x) + 1);
    }
    ProgramCounter::Next
}
