use std::io::Read;

use log::{debug, trace};

use crate::display::FrameBuffer;
use crate::error::Result;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad` with public interfaces for manipulating it
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the machine one cycle at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::from_state(State::new())
    }

    /// A machine whose random byte source is seeded with `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(State::with_seed(seed))
    }

    fn from_state(state: State) -> Self {
        Chip8 {
            state,
            keypad: Keypad::new(),
        }
    }

    /// Load a rom into the program region
    ///
    /// # Arguments
    /// * `rom` the raw program bytes, at most 3584 of them
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_rom(rom)?;
        debug!("loaded {} byte rom", rom.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Advances the machine by a single cycle
    /// - fetches the opcode at the pc and steps the pc past it
    /// - executes the opcode
    /// - ticks the timers
    ///
    /// A failed instruction leaves the pc on it and doesn't tick the timers.
    pub fn cycle(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.state.memory.word(pc)?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );
        self.state.pc = pc.wrapping_add(2);
        if let Err(e) = from_op(&op)(&op, &mut self.state, &self.keypad) {
            self.state.pc = pc;
            return Err(e);
        }
        self.state.timers.tick();
        Ok(())
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn
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

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay()
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound()
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
