use crate::constants::{
    ADDRESS_MASK, MAX_IMAGE_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_ADDR,
};
use crate::error::{Chip8Error, Result};

/// # Memory
///
/// 4096 bytes of flat memory.
/// - `0x000..0x200` is reserved; the sprite sheet lives at `SPRITE_SHEET_ADDR`
/// - `0x200..0x1000` holds the loaded program and its data
///
/// Every address is masked to 12 bits so out of range accesses wrap rather than panic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates memory holding nothing but the sprite sheet
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = SPRITE_SHEET_ADDR as usize;
        bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Copies an image verbatim to `PROGRAM_START`.
    /// Nothing is written if the image doesn't fit.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MAX_IMAGE_SIZE {
            return Err(Chip8Error::ImageTooLarge {
                size: image.len(),
                max: MAX_IMAGE_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    /// A read-only view of all of memory
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
