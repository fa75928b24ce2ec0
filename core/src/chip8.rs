use std::io::Read;
use std::time::Duration;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::fetch;
use crate::operations::Peripherals;
use crate::state::State;
use crate::timing::{Budget, Scheduler};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keys` held on the keypad, with public interfaces for manipulating them
///  - keys `tapped` since the last cycle, so a press and release between cycles still counts
///  - the loaded `image` so the machine can be `reset`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers, separately or for some elapsed time
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for some audio device
pub struct Chip8 {
    state: State,
    keys: Keypad,
    tapped: Keypad,
    config: Config,
    scheduler: Scheduler,
    rng: StdRng,
    image: Vec<u8>,
}

impl Chip8 {
    pub fn new() -> Self {
        let config = Config::default();
        Chip8 {
            state: State::new(),
            keys: Keypad::new(),
            tapped: Keypad::new(),
            scheduler: Scheduler::new(&config),
            config,
            rng: StdRng::from_entropy(),
            image: Vec::new(),
        }
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Chip8 {
            scheduler: Scheduler::new(&config),
            config,
            ..Self::new()
        })
    }

    /// Makes RND reproducible
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copies an image into memory at 0x200
    ///
    /// # Arguments
    /// * `image` the bytes of a ROM; at most 3584 of them
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        self.state.memory.load_image(image)?;
        self.image = image.to_vec();
        debug!("loaded {} byte image", image.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        self.load_image(&image)
    }

    /// Returns to the power-on state with the last loaded image in memory
    pub fn reset(&mut self) {
        self.state = State::new();
        self.keys = Keypad::new();
        self.tapped = Keypad::new();
        self.scheduler.reset();
        // the image fit when it was first loaded, and memory is fresh
        if self.state.memory.load_image(&self.image).is_err() {
            warn!("could not reload image after reset");
        }
        debug!("reset");
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since it was last taken
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.is_awaiting_key()
    }

    pub fn keys(&self) -> &Keypad {
        &self.keys
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keys.press(key);
        self.tapped.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keys.release(key);
        self.state.held_keys.release(key);
    }

    /// Replaces the whole keypad snapshot
    pub fn set_keys(&mut self, keys: Keypad) {
        for key in 0..16 {
            match (self.keys.is_pressed(key), keys.is_pressed(key)) {
                (false, true) => self.tapped.press(key),
                (true, false) => self.state.held_keys.release(key),
                _ => {}
            }
        }
        self.keys = keys;
    }

    /// Advances the CPU by a single cycle
    /// - while awaiting a keypress only checks for a newly pressed key
    /// - otherwise gets and executes the next opcode
    ///
    /// If the opcode fails nothing about the machine changes; pc still points at it.
    pub fn step(&mut self) -> Result<()> {
        if let Some(register) = self.state.register_needing_key {
            let held = self.state.held_keys;
            let key = self
                .keys
                .newly_pressed(&held)
                .or_else(|| self.tapped.newly_pressed(&held));
            self.tapped = Keypad::new();
            match key {
                Some(key) => {
                    trace!("V{:X} = key {:X}", register, key);
                    self.state.v[register as usize] = key;
                    self.state.register_needing_key = None;
                }
                // a held key that gets released will count once it is pressed again
                None => self.state.held_keys.retain_held(&self.keys),
            }
            return Ok(());
        }

        self.tapped = Keypad::new();
        let pc = self.state.pc;
        let op = fetch(&self.state.memory, pc);
        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => {
                warn!("unknown instruction {:04X} at {:03X}", op, pc);
                return Err(Chip8Error::UnknownInstruction { addr: pc, word: op });
            }
        };
        trace!(
            "{:03X}: {:04X} v{:02X?} i{:04X} {}",
            pc,
            op,
            self.state.v,
            self.state.i,
            instruction
        );

        let mut io = Peripherals {
            keys: &self.keys,
            rng: &mut self.rng,
            quirks: self.config.quirks,
        };
        let next = instruction.execute(&mut self.state, &mut io).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        self.state.pc = next.apply(pc);
        Ok(())
    }

    /// Applies a single 60Hz tick to the delay and sound timers
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Spends a budget of cycles and timer ticks, spreading the ticks evenly between cycles
    ///
    /// If a cycle fails the remaining cycles are dropped but every timer tick is still applied.
    pub fn run(&mut self, budget: Budget) -> Result<()> {
        let Budget {
            cycles,
            timer_ticks,
        } = budget;
        let mut result = Ok(());
        let mut ticked = 0;
        for cycle in 0..cycles {
            if let Err(e) = self.step() {
                result = Err(e);
                break;
            }
            let due = (cycle + 1) * timer_ticks / cycles;
            while ticked < due {
                self.tick_timers();
                ticked += 1;
            }
        }
        while ticked < timer_ticks {
            self.tick_timers();
            ticked += 1;
        }
        result
    }

    /// Runs however many cycles and timer ticks are owed for `elapsed` time
    pub fn run_for(&mut self, elapsed: Duration) -> Result<()> {
        let budget = self.scheduler.advance(elapsed);
        self.run(budget)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
