use crate::constants::{
    FONT_GLYPH_HEIGHT, FONT_START, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of byte-addressed memory.
///
/// ```text
/// 0x000..0x050  unused
/// 0x050..0x0A0  font sprite sheet
/// 0x0A0..0x200  unused
/// 0x200..0x1000 program
/// ```
///
/// Every access is bounds checked; touching an address past the end of memory is an
/// `AddressOutOfRange` error rather than a wraparound.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange { addr: addr as usize })
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(addr as usize)
            .ok_or(Chip8Error::AddressOutOfRange { addr: addr as usize })?;
        *cell = value;
        Ok(())
    }

    /// Reads the big-endian word at `addr` and `addr + 1`.
    pub fn word(&self, addr: u16) -> Result<u16> {
        let bytes = self.slice(addr, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Borrows `len` bytes starting at `addr`
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::range(addr, len)?;
        Ok(&self.bytes[range])
    }

    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(addr, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Copies a ROM verbatim into the program region.
    ///
    /// Memory is left untouched if the ROM doesn't fit.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.slice_mut(PROGRAM_START, rom.len())?.copy_from_slice(rom);
        Ok(())
    }

    /// Address of the font glyph for `digit`.
    /// The digit isn't masked to a nibble; values past 0xF point beyond the sprite sheet.
    pub fn font_address(digit: u8) -> u16 {
        FONT_START + FONT_GLYPH_HEIGHT * u16::from(digit)
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first byte that falls outside memory
            return Err(Chip8Error::AddressOutOfRange {
                addr: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
