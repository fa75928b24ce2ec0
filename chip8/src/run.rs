use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::Chip8;
use chip8_display::Display;

use crate::cli::Cli;
use crate::error::RunError;
use crate::keymap::keymap;
use crate::sound::{Beeper, Mute, Sound};

/// The host loop redraws at the 60Hz the timers run at
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// How much faster than real time to run while fast forwarding
const FAST_FORWARD: u32 = 4;

pub fn run(cli: &Cli) -> Result<(), RunError> {
    let mut chip8 = Chip8::with_config(cli.config())?;

    // Load ROM
    let file = File::open(&cli.rom).map_err(|source| RunError::Rom {
        path: cli.rom.clone(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded {}", cli.rom.display());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(RunError::Sdl)?;
    let mut display = Display::new(&sdl, cli.scale).map_err(RunError::Sdl)?;
    let mut sound: Box<dyn Sound> = if cli.mute {
        Box::new(Mute)
    } else {
        Box::new(Beeper::new(&sdl).map_err(RunError::Sdl)?)
    };
    let mut events = sdl.event_pump().map_err(RunError::Sdl)?;

    // Whether or not the configured clock speed should be respected
    let mut fast_forward: bool = false;
    let mut last_frame: Instant = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Backspace, _) => {
                        info!("resetting");
                        chip8.reset();
                    }
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let current_time = Instant::now();
        let mut elapsed = current_time - last_frame;
        last_frame = current_time;
        if fast_forward {
            elapsed *= FAST_FORWARD;
        }
        chip8.run_for(elapsed)?;

        // If the frame changed, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(RunError::Sdl)?;
        }
        sound.set_playing(chip8.sound_active());

        // Handle timing
        let busy = Instant::now() - current_time;
        if FRAME_TIME > busy {
            std::thread::sleep(FRAME_TIME - busy);
        }
    }

    debug!("quit");
    Ok(())
}
