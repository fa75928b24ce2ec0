use std::io;
use std::path::PathBuf;

use thiserror::Error;

use chip8_core::Chip8Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not open ROM {}", path.display())]
    Rom {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Chip8(#[from] Chip8Error),

    #[error("sdl2: {0}")]
    Sdl(String),
}
