use crate::constants::OPCODE_SIZE;
use crate::memory::Memory;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian. Their behavior is cased on some
/// combination of:
/// - `(n, _, _, _)` the group; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within groups 5, 8 and 9
/// - `(_, _, n, n)` specific behavior within groups E and F
/// - `(_, n, n, n)` fixed functions in group 0 (CLS, RET)
///
/// Nibbles not used to determine the operation carry its operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an immediate byte assigned to and/or compared with Vx
/// - `(_, n, _, _)` either the register Vx or a range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble, still in place.
    /// `[g___]`
    fn group(&self) -> u16;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self.group() >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn group(&self) -> u16 {
        self & 0xF000
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Gets the opcode stored at `pc`.
/// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
pub fn fetch(memory: &Memory, pc: u16) -> u16 {
    let left = u16::from(memory.read(pc));
    let right = u16::from(memory.read(pc.wrapping_add(OPCODE_SIZE - 1)));
    left << 8 | right
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_group() {
        let op: u16 = 0xABCD;
        assert_eq!(op.group(), 0xA000);
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0xABCD;
        assert_eq!(op.kk(), 0x00CD);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0xABCD;
        assert_eq!(op.addr(), 0x0BCD);
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAA);
        memory.write(0x201, 0xBB);
        assert_eq!(fetch(&memory, 0x200), 0xAABB);
    }

    #[test]
    fn test_fetch_wraps_at_end_of_memory() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12);
        memory.write(0x000, 0x34);
        assert_eq!(fetch(&memory, 0xFFF), 0x1234);
        // addresses past 0xFFF are masked before reading
        assert_eq!(fetch(&memory, 0x1FFF), 0x1234);
    }
}
