use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// Something that can play a tone while the sound timer is running
pub trait Sound {
    fn set_playing(&mut self, playing: bool);
}

const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.1;

pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A square wave played through SDL2's default output device
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: PITCH / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }
}

impl Sound for Beeper {
    fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}

pub struct Mute;

impl Sound for Mute {
    fn set_playing(&mut self, _playing: bool) {}
}
