use std::path::PathBuf;

use clap::Parser;

use chip8_core::{Config, Quirks, CLOCK_SPEED, TIMER_SPEED};

#[derive(Parser, Debug)]
#[command(
    name = "chip8",
    about = "Run a Chip-8 ROM",
    long_about = "Runs a Chip-8 ROM in an SDL2 window.\n\
                  The keypad is mapped to 1-4, Q-R, A-F and Z-V. Hold space to fast forward, \
                  press backspace to reset and escape to quit.",
    version
)]
pub struct Cli {
    /// ROM file to run
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(short = 'c', long, default_value_t = CLOCK_SPEED)]
    pub clock_speed: u32,

    /// Size of each Chip-8 pixel in screen pixels
    #[arg(short = 's', long, default_value_t = 10)]
    pub scale: u32,

    /// SHR and SHL shift Vy into Vx
    #[arg(long)]
    pub shift_uses_vy: bool,

    /// LD [I], Vx and LD Vx, [I] advance I past the registers they copy
    #[arg(long)]
    pub load_store_increments_i: bool,

    /// Don't play a tone while the sound timer runs
    #[arg(short = 'm', long)]
    pub mute: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            clock_speed: self.clock_speed,
            timer_speed: TIMER_SPEED,
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                load_store_increments_i: self.load_store_increments_i,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["chip8", "pong.ch8"]);
        assert_eq!(cli.rom, PathBuf::from("pong.ch8"));
        assert_eq!(cli.config(), Config::default());
        assert_eq!(cli.scale, 10);
        assert!(!cli.mute);
    }

    #[test]
    fn test_quirk_flags() {
        let cli = Cli::parse_from(["chip8", "-c", "700", "--shift-uses-vy", "rom.ch8"]);
        let config = cli.config();
        assert_eq!(config.clock_speed, 700);
        assert!(config.quirks.shift_uses_vy);
        assert!(!config.quirks.load_store_increments_i);
    }
}
