use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

const CELLS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// # FrameBuffer
/// The 64x32 monochrome display, indexed as `[y][x]`.
///
/// Sprites are XORed onto the buffer. Only the sprite's origin wraps around the screen; the
/// pixels themselves are addressed through the row-major index `y * 64 + x`, so a sprite that
/// runs off the right edge continues at the start of the next row and one that runs off the
/// bottom is cut short.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at `(x, y)` is lit. Out of bounds pixels are dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// Number of lit pixels
    pub fn lit(&self) -> usize {
        self.pixels.iter().flatten().filter(|p| **p).count()
    }

    /// XORs `sprite` onto the buffer with its top-left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost. Returns true if any
    /// lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = x as usize % DISPLAY_WIDTH;
        let y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let index = (y + row) * DISPLAY_WIDTH + x + col;
                if index >= CELLS {
                    continue;
                }
                let pixel = &mut self.pixels[index / DISPLAY_WIDTH][index % DISPLAY_WIDTH];
                collision |= *pixel;
                *pixel ^= true;
            }
        }
        collision
    }

    #[cfg(test)]
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, lit: bool) {
        self.pixels[y][x] = lit;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(frame: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for (y, row) in frame.rows().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                if *pixel {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_starts_clear() {
        assert_eq!(FrameBuffer::new().lit(), 0);
    }

    #[test]
    fn test_draw_one_row() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(8, 2, &[0b1010_1011]);
        assert!(!collision);
        assert_eq!(
            lit_cells(&frame),
            vec![(8, 2), (10, 2), (12, 2), (14, 2), (15, 2)]
        );
    }

    #[test]
    fn test_draw_xors() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 0, true);
        frame.set_pixel(3, 0, true);
        // 0101 on screen, 1100 drawn
        let collision = frame.draw_sprite(0, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(lit_cells(&frame), vec![(0, 0), (3, 0)]);
    }

    #[test]
    fn test_no_collision_when_only_lighting() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 0, true);
        let collision = frame.draw_sprite(0, 0, &[0b1000_0000]);
        assert!(!collision);
    }

    #[test]
    fn test_drawing_twice_erases() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(20, 10, &[0xFF, 0x81, 0xFF]);
        let collision = frame.draw_sprite(20, 10, &[0xFF, 0x81, 0xFF]);
        assert!(collision);
        assert_eq!(frame.lit(), 0);
    }

    #[test]
    fn test_origin_wraps() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(64 + 3, 32 + 1, &[0b1000_0000]);
        assert_eq!(lit_cells(&frame), vec![(3, 1)]);
    }

    #[test]
    fn test_right_edge_spills_into_next_row() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(62, 0, &[0xFF]);
        assert_eq!(
            lit_cells(&frame),
            vec![(62, 0), (63, 0), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]
        );
    }

    #[test]
    fn test_bottom_edge_is_cut_short() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80]);
        assert_eq!(lit_cells(&frame), vec![(0, 30), (0, 31)]);
    }

    #[test]
    fn test_bottom_right_corner() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(63, 31, &[0xFF]);
        assert_eq!(lit_cells(&frame), vec![(63, 31)]);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF; 15]);
        frame.clear();
        assert_eq!(frame.lit(), 0);
    }

    #[test]
    fn test_pixel_out_of_bounds_is_dark() {
        let frame = FrameBuffer::new();
        assert!(!frame.pixel(64, 0));
        assert!(!frame.pixel(0, 32));
    }
}
