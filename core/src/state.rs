use crate::constants::PROGRAM_START;
use crate::frame::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter pointing at the next instruction
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz
///
/// ## Memory
/// - a 16 entry return address stack
/// - 4096 bytes of addressable memory
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - Emulation halts while `register_needing_key` is set, until a key that wasn't in
///   `held_keys` is pressed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
    pub held_keys: Keypad,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::new(),
            draw_flag: false,
            register_needing_key: None,
            held_keys: Keypad::new(),
        }
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.register_needing_key.is_some()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
