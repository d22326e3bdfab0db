//! 3x8 glyphs for the LED matrix. `1` marks a lit pixel, rows top to bottom.

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 8;

pub type Glyph = [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT];

pub const FONT: [Glyph; 10] = [
    // 0
    [[0, 0, 0], [1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 1
    [[0, 0, 0], [0, 1, 0], [1, 1, 0], [0, 1, 0], [0, 1, 0], [0, 1, 0], [1, 1, 1], [0, 0, 0]],
    // 2
    [[0, 0, 0], [1, 1, 1], [0, 0, 1], [1, 1, 1], [1, 0, 0], [1, 0, 0], [1, 1, 1], [0, 0, 0]],
    // 3
    [[0, 0, 0], [1, 1, 1], [0, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 4
    [[0, 0, 0], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [0, 0, 1], [0, 0, 0]],
    // 5
    [[0, 0, 0], [1, 1, 1], [1, 0, 0], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 6
    [[0, 0, 0], [1, 1, 1], [1, 0, 0], [1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 7
    [[0, 0, 0], [1, 1, 1], [0, 0, 1], [0, 0, 1], [0, 1, 0], [0, 1, 0], [0, 1, 0], [0, 0, 0]],
    // 8
    [[0, 0, 0], [1, 1, 1], [1, 0, 1], [1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 9
    [[0, 0, 0], [1, 1, 1], [1, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
];

pub const COLON: Glyph = [[0, 0, 0], [0, 0, 0], [0, 1, 0], [0, 0, 0], [0, 0, 0], [0, 1, 0], [0, 0, 0], [0, 0, 0]];

pub const BLANK: Glyph = [[0; GLYPH_WIDTH]; GLYPH_HEIGHT];

/// Glyph for `ch`, or `None` if the font has no such character.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch {
        '0'..='9' => FONT.get(ch as usize - '0' as usize),
        ':' => Some(&COLON),
        ' ' => Some(&BLANK),
        _ => None,
    }
}
