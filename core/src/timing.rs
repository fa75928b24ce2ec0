use std::time::Duration;

use crate::config::Config;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Work owed to the machine for some amount of elapsed time
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub cycles: u64,
    pub timer_ticks: u64,
}

/// # Scheduler
/// Converts wall-clock time into CPU cycles and timer ticks.
///
/// The two rates are independent: at the defaults roughly 8 instructions run per timer
/// tick. Fractions of a cycle or tick are carried over to the next call so that the
/// long-run rates are exact however the elapsed time is sliced.
#[derive(Clone, Debug)]
pub struct Scheduler {
    clock_speed: u128,
    timer_speed: u128,
    // elapsed nanoseconds scaled by the rate, not yet spent
    cycle_carry: u128,
    timer_carry: u128,
}

impl Scheduler {
    pub fn new(config: &Config) -> Self {
        Scheduler {
            clock_speed: u128::from(config.clock_speed),
            timer_speed: u128::from(config.timer_speed),
            cycle_carry: 0,
            timer_carry: 0,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> Budget {
        let nanos = elapsed.as_nanos();

        self.cycle_carry += nanos * self.clock_speed;
        let cycles = self.cycle_carry / NANOS_PER_SEC;
        self.cycle_carry %= NANOS_PER_SEC;

        self.timer_carry += nanos * self.timer_speed;
        let timer_ticks = self.timer_carry / NANOS_PER_SEC;
        self.timer_carry %= NANOS_PER_SEC;

        Budget {
            cycles: cycles as u64,
            timer_ticks: timer_ticks as u64,
        }
    }

    /// Drops any partially elapsed cycle or tick
    pub fn reset(&mut self) {
        self.cycle_carry = 0;
        self.timer_carry = 0;
    }
}
