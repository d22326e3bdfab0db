//! Frame for four chained MAX7219 8x8 matrices (FC16 layout, 32x8 pixels).

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;
use heapless::String;

use crate::field::{FieldId, TextDisplay};
use crate::font::{glyph, BLANK, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::format::{DATE_LEN, STEPS_LEN};

pub const DEVICES: usize = 4;
pub const WIDTH: usize = DEVICES * 8;
pub const HEIGHT: usize = GLYPH_HEIGHT;

/// The time field drawn right-aligned on the matrix. Date and steps do not
/// fit on the panel and are only kept for reporting.
pub struct MatrixPanel {
    /// One word per row, bit 31 is the leftmost column.
    rows: [u32; HEIGHT],
    date: String<DATE_LEN>,
    steps: String<STEPS_LEN>,
    dirty: bool,
}

impl MatrixPanel {
    pub fn new() -> Self {
        Self {
            rows: [0; HEIGHT],
            date: String::new(),
            steps: String::new(),
            dirty: false,
        }
    }

    /// Replaces the frame with `text`, right-aligned, one blank column between
    /// glyphs. Characters missing from the font are left blank.
    pub fn draw_text(&mut self, text: &str) {
        self.rows = [0; HEIGHT];
        let count = text.chars().count();
        let advance = GLYPH_WIDTH + 1;
        let width = (count * advance).saturating_sub(1);
        let start = WIDTH as i32 - width as i32;

        for (i, ch) in text.chars().enumerate() {
            let left = start + (i * advance) as i32;
            let pixels = glyph(ch).unwrap_or(&BLANK).iter().enumerate().flat_map(move |(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, lit)| **lit != 0)
                    .map(move |(c, _)| Pixel(Point::new(left + c as i32, r as i32), BinaryColor::On))
            });
            self.draw_iter(pixels).unwrap_or_else(|never| match never {});
        }
        self.dirty = true;
    }

    /// Prepares the 8x8 buffers for the 4 chained MAX7219 devices, leftmost first.
    pub fn device_buffers(&self) -> [[u8; 8]; DEVICES] {
        let mut device_buffers = [[0u8; 8]; DEVICES];
        for (dev_idx, buffer) in device_buffers.iter_mut().enumerate() {
            let shift = 24 - (dev_idx * 8);
            for (r, byte) in buffer.iter_mut().enumerate() {
                *byte = ((self.rows[r] >> shift) & 0xFF) as u8;
            }
        }
        device_buffers
    }

    /// Returns true once after each change of the frame.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn steps(&self) -> &str {
        &self.steps
    }
}

impl Default for MatrixPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for MatrixPanel {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for MatrixPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let mask = 1u32 << (31 - x);
            match color {
                BinaryColor::On => self.rows[y] |= mask,
                BinaryColor::Off => self.rows[y] &= !mask,
            }
        }
        Ok(())
    }
}

impl TextDisplay for MatrixPanel {
    fn render(&mut self, field: FieldId, text: &str) {
        match field {
            FieldId::Time => self.draw_text(text),
            FieldId::Date => copy_truncated(&mut self.date, text),
            FieldId::Steps => copy_truncated(&mut self.steps, text),
        }
    }
}

fn copy_truncated<const N: usize>(dst: &mut String<N>, text: &str) {
    dst.clear();
    for ch in text.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}
