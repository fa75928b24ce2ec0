use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Chip-8 FrameBuffer
/// The frame buffer stores the on/off state of each of the 64x32 display pixels.
///
/// It is indexed as `[y][x]` so that each row can be handed to a renderer as is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Coordinates wrap around the edges of the display
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] = on;
    }

    pub fn rows(&self) -> &[[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|row| row.iter().all(|&p| !p))
    }

    /// XORs a sprite onto the display with its top left corner at `x`, `y`.
    ///
    /// Each byte of `sprite` is one row, drawn most significant bit first. Pixels that fall
    /// off the right or bottom edge wrap around to the opposite edge.
    ///
    /// Returns whether any pixel was switched from on to off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let px = (x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_without_collision() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw_sprite(1, 1, &[0b1010_0000]));
        assert!(frame.pixel(1, 1));
        assert!(!frame.pixel(2, 1));
        assert!(frame.pixel(3, 1));
    }

    #[test]
    fn test_xors_and_collides() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(2, 0, true);
        frame.set_pixel(4, 0, true);
        // 1 1 0 0 over 1 0 1 0
        assert!(frame.draw_sprite(2, 0, &[0b1100_0000]));
        assert_eq!(frame.rows()[0][2..6], [false, true, true, false]);
    }

    #[test]
    fn test_wraps_horizontally_and_vertically() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(62, 31, &[0b1110_0000, 0b1000_0000]);
        assert!(frame.pixel(62, 31));
        assert!(frame.pixel(63, 31));
        assert!(frame.pixel(0, 31));
        assert!(frame.pixel(62, 0));
        assert!(!frame.pixel(1, 31));
    }

    #[test]
    fn test_double_draw_restores_frame() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(10, 10, true);
        let before = frame;
        frame.draw_sprite(8, 9, &[0xFF, 0x81, 0xFF]);
        assert_ne!(frame, before);
        frame.draw_sprite(8, 9, &[0xFF, 0x81, 0xFF]);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF; 15]);
        frame.clear();
        assert!(frame.is_blank());
    }
}
