use thiserror::Error;

/// Conditions that abort a Chip-8 cycle or prevent a machine from starting.
///
/// Chip-8 has no defined recovery semantics so none of these are handled internally;
/// the host decides whether to halt, reset or report them.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unknown instruction {word:#06X} at {addr:#05X}")]
    UnknownInstruction { addr: u16, word: u16 },

    #[error("stack overflow calling from {addr:#05X}")]
    StackOverflow { addr: u16 },

    #[error("stack underflow returning from {addr:#05X}")]
    StackUnderflow { addr: u16 },

    #[error("image is {size} bytes but at most {max} fit in memory")]
    ImageTooLarge { size: usize, max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to read image")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
