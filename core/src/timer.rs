/// # Timers
/// The delay and sound countdowns.
///
/// Both are decremented once per CPU cycle while nonzero. Nothing here knows about wall-clock
/// time; approximating 60Hz is up to whoever decides how often to cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// A tone should be playing while the sound timer is running
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
