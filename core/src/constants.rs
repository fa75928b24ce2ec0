/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every memory address; accesses wrap modulo `MEMORY_SIZE`
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// 0x200 is where ROMs are loaded into memory
pub const PROGRAM_START: u16 = 0x200;

/// The largest image that fits between `PROGRAM_START` and the end of memory
pub const MAX_IMAGE_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Size of a single instruction in bytes
pub const OPCODE_SIZE: u16 = 2;

/// Levels of nested subroutines
pub const STACK_SIZE: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Instructions executed per second unless configured otherwise
pub const CLOCK_SPEED: u32 = 500;

/// Delay and sound timers are decremented at 60Hz
pub const TIMER_SPEED: u32 = 60;

/// Address of the first byte of the sprite sheet
pub const SPRITE_SHEET_ADDR: u16 = 0x000;

/// Bytes per hexadecimal digit sprite
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Each hex digit 0..F is a 4x5 sprite; one byte per row with the high nibble drawn.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
