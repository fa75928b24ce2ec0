use std::fmt;

use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instructions
/// The 35 instructions of the original Chip-8, decoded from an opcode.
///
/// `x` and `y` name registers, `kk` is an immediate byte, `addr` a 12-bit address and `n`
/// the height of a sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `0nnn` SYS addr
    Sys { addr: u16 },
    /// `00E0` CLS
    Cls,
    /// `00EE` RET
    Ret,
    /// `1nnn` JP addr
    Jp { addr: u16 },
    /// `2nnn` CALL addr
    Call { addr: u16 },
    /// `3xkk` SE Vx, byte
    SeByte { x: u8, kk: u8 },
    /// `4xkk` SNE Vx, byte
    SneByte { x: u8, kk: u8 },
    /// `5xy0` SE Vx, Vy
    SeReg { x: u8, y: u8 },
    /// `6xkk` LD Vx, byte
    LdByte { x: u8, kk: u8 },
    /// `7xkk` ADD Vx, byte
    AddByte { x: u8, kk: u8 },
    /// `8xy0` LD Vx, Vy
    LdReg { x: u8, y: u8 },
    /// `8xy1` OR Vx, Vy
    Or { x: u8, y: u8 },
    /// `8xy2` AND Vx, Vy
    And { x: u8, y: u8 },
    /// `8xy3` XOR Vx, Vy
    Xor { x: u8, y: u8 },
    /// `8xy4` ADD Vx, Vy
    AddReg { x: u8, y: u8 },
    /// `8xy5` SUB Vx, Vy
    Sub { x: u8, y: u8 },
    /// `8xy6` SHR Vx {, Vy}
    Shr { x: u8, y: u8 },
    /// `8xy7` SUBN Vx, Vy
    Subn { x: u8, y: u8 },
    /// `8xyE` SHL Vx {, Vy}
    Shl { x: u8, y: u8 },
    /// `9xy0` SNE Vx, Vy
    SneReg { x: u8, y: u8 },
    /// `Annn` LD I, addr
    LdI { addr: u16 },
    /// `Bnnn` JP V0, addr
    JpV0 { addr: u16 },
    /// `Cxkk` RND Vx, byte
    Rnd { x: u8, kk: u8 },
    /// `Dxyn` DRW Vx, Vy, nibble
    Drw { x: u8, y: u8, n: u8 },
    /// `Ex9E` SKP Vx
    Skp { x: u8 },
    /// `ExA1` SKNP Vx
    Sknp { x: u8 },
    /// `Fx07` LD Vx, DT
    LdVxDt { x: u8 },
    /// `Fx0A` LD Vx, K
    LdVxK { x: u8 },
    /// `Fx15` LD DT, Vx
    LdDtVx { x: u8 },
    /// `Fx18` LD ST, Vx
    LdStVx { x: u8 },
    /// `Fx1E` ADD I, Vx
    AddI { x: u8 },
    /// `Fx29` LD F, Vx
    LdF { x: u8 },
    /// `Fx33` LD B, Vx
    LdB { x: u8 },
    /// `Fx55` LD [I], Vx
    Store { x: u8 },
    /// `Fx65` LD Vx, [I]
    Load { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode, if there is one
    pub fn decode(op: u16) -> Option<Self> {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match (op.group() >> 12, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x0, ..) => Sys { addr },
            (0x1, ..) => Jp { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SeByte { x, kk },
            (0x4, ..) => SneByte { x, kk },
            (0x5, .., 0x0) => SeReg { x, y },
            (0x6, ..) => LdByte { x, kk },
            (0x7, ..) => AddByte { x, kk },
            (0x8, .., 0x0) => LdReg { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x, y },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x, y },
            (0x9, .., 0x0) => SneReg { x, y },
            (0xA, ..) => LdI { addr },
            (0xB, ..) => JpV0 { addr },
            (0xC, ..) => Rnd { x, kk },
            (0xD, ..) => Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skp { x },
            (0xE, _, 0xA, 0x1) => Sknp { x },
            (0xF, _, 0x0, 0x7) => LdVxDt { x },
            (0xF, _, 0x0, 0xA) => LdVxK { x },
            (0xF, _, 0x1, 0x5) => LdDtVx { x },
            (0xF, _, 0x1, 0x8) => LdStVx { x },
            (0xF, _, 0x1, 0xE) => AddI { x },
            (0xF, _, 0x2, 0x9) => LdF { x },
            (0xF, _, 0x3, 0x3) => LdB { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Load { x },
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the Instruction to `state`, returning where the program counter goes next.
    ///
    /// `state.pc` must still point at this instruction. On error `state` is untouched.
    pub fn execute(self, state: &mut State, io: &mut Peripherals) -> Result<ProgramCounter> {
        use Instruction::*;

        let pc = match self {
            Sys { addr } => sys(addr),
            Cls => clr(state),
            Ret => rts(state)?,
            Jp { addr } => jump(addr),
            Call { addr } => call(state, addr)?,
            SeByte { x, kk } => ske(state, x, kk),
            SneByte { x, kk } => skne(state, x, kk),
            SeReg { x, y } => skre(state, x, y),
            LdByte { x, kk } => load(state, x, kk),
            AddByte { x, kk } => add(state, x, kk),
            LdReg { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddReg { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            Shr { x, y } => shr(state, x, y, io.quirks),
            Subn { x, y } => subn(state, x, y),
            Shl { x, y } => shl(state, x, y, io.quirks),
            SneReg { x, y } => skrne(state, x, y),
            LdI { addr } => loadi(state, addr),
            JpV0 { addr } => jumpi(state, addr),
            Rnd { x, kk } => rand(state, x, kk, &mut *io.rng),
            Drw { x, y, n } => draw(state, x, y, n),
            Skp { x } => skpr(state, x, io.keys),
            Sknp { x } => skup(state, x, io.keys),
            LdVxDt { x } => moved(state, x),
            LdVxK { x } => keyd(state, x, io.keys),
            LdDtVx { x } => loads(state, x),
            LdStVx { x } => ld(state, x),
            AddI { x } => addi(state, x),
            LdF { x } => ldspr(state, x),
            LdB { x } => bcd(state, x),
            Store { x } => stor(state, x, io.quirks),
            Load { x } => read(state, x, io.quirks),
        };
        Ok(pc)
    }
}

impl Instruction {
    fn write_mnemonic(&self, f: &mut impl fmt::Write) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Cls => f.write_str("CLS"),
            Ret => f.write_str("RET"),
            Jp { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SeByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SneByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, .. } => write!(f, "SHR V{:X}", x),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, .. } => write!(f, "SHL V{:X}", x),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { addr } => write!(f, "LD I, {:#05X}", addr),
            JpV0 { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rnd { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            LdVxK { x } => write!(f, "LD V{:X}, K", x),
            LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdF { x } => write!(f, "LD F, V{:X}", x),
            LdB { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Load { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

/// Honours width and alignment, e.g. `{:<16}`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.width().is_none() {
            return self.write_mnemonic(f);
        }
        let mut text = String::new();
        self.write_mnemonic(&mut text)?;
        f.pad(&text)
    }
}
