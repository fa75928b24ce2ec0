//! # Chip-8 core
//! An interpreter for the original 35 instruction Chip-8.
//!
//! The core owns memory, registers, the stack, timers and the frame buffer. Everything
//! that touches the outside world (loading files, rendering, reading a keyboard, playing
//! sound) is left to the host, which drives a [`Chip8`] through its public interface.
pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH, TIMER_SPEED};
pub use error::{Chip8Error, Result};
pub use frame::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use state::State;
pub use timing::{Budget, Scheduler};

mod chip8;
pub mod config;
pub mod constants;
mod error;
pub mod frame;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod operations;
pub mod stack;
pub mod state;
pub mod timers;
pub mod timing;
