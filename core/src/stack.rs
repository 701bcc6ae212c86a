use crate::constants::STACK_SIZE;
use crate::error::{Chip8Error, Result};

/// # Stack
/// Return addresses for nested subroutine calls.
///
/// `sp` is the number of occupied slots; a push writes `slots[sp]` then increments it and a
/// pop decrements it then reads `slots[sp]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_SIZE],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        let slot = self
            .slots
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp as usize])
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// The occupied slots, oldest call first
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.sp as usize]
    }
}
