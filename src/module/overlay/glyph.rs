//! 3x5 bitmap glyphs for the hotspot label.
//!
//! Covers the digits `0`-`9`, `.`, `-`, `°` and `C`, which is every
//! character `hotspot_label` produces. Anything else renders blank.

pub const WIDTH: u32 = 3;
pub const HEIGHT: u32 = 5;
/// Horizontal distance between glyph origins.
pub const ADVANCE: u32 = WIDTH + 1;

/// Rows of a glyph, top first. Bit 2 is the leftmost column.
fn rows(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '°' => [0b010, 0b101, 0b010, 0b000, 0b000],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        _ => [0; 5],
    }
}

/// Whether the pixel at column `x`, row `y` of glyph `c` is set.
pub fn is_set(c: char, x: u32, y: u32) -> bool {
    if x >= WIDTH || y >= HEIGHT {
        return false;
    }
    rows(c)[y as usize] & (1 << (WIDTH - 1 - x)) != 0
}

/// Rendered width of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale
    }
}
