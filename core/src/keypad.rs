/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// A `Keypad` is a snapshot of which of those 16 keys are currently held.
/// Keys outside `0x0..=0xF` don't exist: they are never pressed and are ignored when set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.pressed.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.pressed.get_mut(key as usize) {
            *k = false;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key held now that isn't held in `earlier`
    pub fn newly_pressed(&self, earlier: &Keypad) -> Option<u8> {
        (0..16u8).find(|&key| self.is_pressed(key) && !earlier.is_pressed(key))
    }

    /// Keeps only the keys that are also held in `other`
    pub fn retain_held(&mut self, other: &Keypad) {
        for (mine, theirs) in self.pressed.iter_mut().zip(other.pressed.iter()) {
            *mine &= *theirs;
        }
    }
}
