//! Color tables used by the SGR handler and color normalization.

use super::types::Color;

/// RGB values of the 16 base palette slots.
pub const BASIC_RGB: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0xcd, 0x00, 0x00],
    [0x00, 0xcd, 0x00],
    [0xcd, 0xcd, 0x00],
    [0x00, 0x00, 0xee],
    [0xcd, 0x00, 0xcd],
    [0x00, 0xcd, 0xcd],
    [0xe5, 0xe5, 0xe5],
    [0x7f, 0x7f, 0x7f],
    [0xff, 0x00, 0x00],
    [0x00, 0xff, 0x00],
    [0xff, 0xff, 0x00],
    [0x5c, 0x5c, 0xff],
    [0xff, 0x00, 0xff],
    [0x00, 0xff, 0xff],
    [0xff, 0xff, 0xff],
];

/// The six channel levels of the 6x6x6 cube, as 4-bit `#rgb` digits,
/// in increasing brightness.
pub const CUBE_LEVELS: [u8; 6] = [0x0, 0x6, 0x8, 0xa, 0xd, 0xf];

/// Grayscale percentages for the 24 ramp entries 232..=255.
pub const GRAY_STEPS: [u8; 24] = [
    3, 7, 11, 13, 15, 19, 23, 27, 31, 35, 38, 42, 46, 50, 52, 58, 62, 66, 70, 74, 78, 82, 85, 89,
];

/// Map a 256-color index to a cell color.
///
/// Indexes below 16 are returned as palette slots; the caller decides
/// how bright slots interact with bold.
pub fn color_from_index(index: u16) -> Color {
    match index {
        0..=15 => Color::Indexed(index as u8),
        16..=231 => {
            let n = (index - 16) as usize;
            let (r, rest) = (n / 36, n % 36);
            let (g, b) = (rest / 6, rest % 6);
            Color::Rgb4(CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b])
        }
        232..=255 => Color::Gray(GRAY_STEPS[(index - 232) as usize]),
        _ => Color::Default,
    }
}

/// Quantize an 8-bit channel to the nearest cube level digit.
pub fn nearest_level(x: u8) -> u8 {
    match x {
        0x00..=0x2f => 0x0,
        0x30..=0x6f => 0x6,
        0x70..=0x97 => 0x8,
        0x98..=0xbf => 0xa,
        0xc0..=0xe7 => 0xd,
        _ => 0xf,
    }
}

/// Quantize a truecolor value into cube levels.
pub fn color_from_rgb(r: u16, g: u16, b: u16) -> Color {
    let clamp = |v: u16| v.min(255) as u8;
    Color::Rgb4(
        nearest_level(clamp(r)),
        nearest_level(clamp(g)),
        nearest_level(clamp(b)),
    )
}

/// Convert a grayscale percentage to an 8-bit channel value.
pub fn gray_to_rgb8(level: u8) -> u8 {
    ((level.min(100) as u32 * 255 + 50) / 100) as u8
}

/// Index into the xterm 256-color table closest to an 8-bit RGB triple.
///
/// Used by the terminal sink, which always writes 256-color codes.
pub fn rgb8_to_xterm256(rgb: [u8; 3]) -> u8 {
    const STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];
    let nearest = |v: u8| {
        STEPS
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| (i16::from(**s) - i16::from(v)).abs())
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    };
    let [r, g, b] = rgb;
    if r == g && g == b {
        // the gray ramp is finer than the cube diagonal
        if r < 8 {
            return 16;
        }
        if r > 238 {
            return 231;
        }
        return 232 + ((r as u16 - 8) / 10).min(23) as u8;
    }
    16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b)
}
