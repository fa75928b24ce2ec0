/// # Timers
/// Two 8-bit counters that count down to zero at 60Hz.
/// - the delay timer is read and written by programs
/// - the sound timer plays a tone whenever it is non-zero
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single 60Hz tick to both timers
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
