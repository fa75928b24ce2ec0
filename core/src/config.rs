use crate::constants::{CLOCK_SPEED, TIMER_SPEED};
use crate::error::{Chip8Error, Result};

/// Behaviors that differ between historical interpreters.
/// Everything is off by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// SHR and SHL shift Vy into Vx instead of shifting Vx in place
    pub shift_uses_vy: bool,
    /// Fx55 and Fx65 leave I pointing just past the last byte they touched
    pub load_store_increments_i: bool,
}

/// How fast and in which dialect a `Chip8` runs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second
    pub clock_speed: u32,
    /// Timer ticks per second
    pub timer_speed: u32,
    pub quirks: Quirks,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.clock_speed == 0 {
            return Err(Chip8Error::InvalidConfig("clock speed must be non-zero"));
        }
        if self.timer_speed == 0 {
            return Err(Chip8Error::InvalidConfig("timer speed must be non-zero"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_speed: TIMER_SPEED,
            quirks: Quirks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_rates() {
        let config = Config {
            clock_speed: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Chip8Error::InvalidConfig(_))
        ));
        let config = Config {
            timer_speed: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
