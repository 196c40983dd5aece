//! Color values for the badge
//!
//! Colors are stored as straight (non-premultiplied) RGBA8 and are written
//! to the shm buffer as premultiplied ARGB8888, which on little-endian
//! machines is laid out in memory as `[b, g, r, a]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Matches the 2/3 white gray commonly used for placeholder circles
    pub const LIGHT_GRAY: Color = Color::rgba(170, 170, 170, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Premultiplied ARGB8888 bytes with an extra coverage factor applied
    /// (255 = fully covered).
    pub fn to_argb8888(self, coverage: u8) -> [u8; 4] {
        let alpha = mul_div255(self.a, coverage);
        [
            mul_div255(self.b, alpha),
            mul_div255(self.g, alpha),
            mul_div255(self.r, alpha),
            alpha,
        ]
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// `a * b / 255` rounded to nearest
pub(crate) fn mul_div255(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}
