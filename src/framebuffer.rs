use crate::arch;
use crate::util;

// One u64 per row, bit 63 is the leftmost pixel.
pub type Frame = util::Array<u64, {arch::DISPLAY_HEIGHT as usize}>;

/// Monochrome 64x32 pixel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    frame: Frame,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            frame: Frame::new(),
        }
    }

    pub fn clear_screen(&mut self) {
        self.frame.clear();
    }

    pub fn get_frame(&self) -> &Frame {
        &self.frame
    }

    fn mask(x: u32) -> u64 {
        1u64 << (arch::DISPLAY_WIDTH - 1 - x % arch::DISPLAY_WIDTH)
    }

    /// Pixel at `(x, y)`, coordinates wrap around the grid.
    pub fn pixel_at(&self, x: u32, y: u32) -> u8 {
        (self.frame[y % arch::DISPLAY_HEIGHT] & Self::mask(x) != 0) as u8
    }

    pub fn set_pixel_at(&mut self, x: u32, y: u32, bit: u8) {
        let row = &mut self.frame[y % arch::DISPLAY_HEIGHT];
        if bit & 1 != 0 {
            *row |= Self::mask(x);
        } else {
            *row &= !Self::mask(x);
        }
    }

    /// XORs an 8-pixel wide sprite onto the grid and reports whether any lit
    /// pixel was erased.
    ///
    /// The start position wraps, the sprite body is clipped at the right and
    /// bottom edges.
    pub fn draw_sprite(&mut self, sprite: &[u8], start_x: u32, start_y: u32) -> bool {
        let mut collision = false;

        let start_x = start_x % arch::DISPLAY_WIDTH;
        let start_y = start_y % arch::DISPLAY_HEIGHT;

        for (n, s) in sprite.iter().enumerate() {
            let frame_y = start_y + n as u32;
            if frame_y >= arch::DISPLAY_HEIGHT {
                break;
            }

            for x in 0..8 {
                let frame_x = start_x + x;
                if frame_x >= arch::DISPLAY_WIDTH {
                    break;
                }

                if s & (0x80u8 >> x) != 0 {
                    let frame_bit = self.pixel_at(frame_x, frame_y);
                    collision |= frame_bit == 1;
                    self.set_pixel_at(frame_x, frame_y, frame_bit ^ 1);
                }
            }
        }
        collision
    }

    /// Number of lit pixels.
    pub fn lit(&self) -> u32 {
        self.frame.iter().map(|row| row.count_ones()).sum()
    }

    #[cfg(test)]
    fn fill_frame_u8(&mut self, v: u8) {
        let row = u64::from_ne_bytes([v; 8]);
        for i in 0..arch::DISPLAY_HEIGHT {
            self.frame[i] = row;
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
