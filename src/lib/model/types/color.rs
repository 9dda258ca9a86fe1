//! Module implementing the `Color` type.

use std::fmt;

use image::Rgba;


/// RGB color of the text, band background, or separator line.
///
/// Parse it from a string with `str::parse`, which accepts `R,G,B` triples
/// as well as any CSS color syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Create a white color.
    #[inline]
    pub fn white() -> Self {
        Self::gray(0xff)
    }

    /// Create a black color.
    #[inline]
    pub fn black() -> Self {
        Self::gray(0x0)
    }

    /// Create a gray color of given intensity.
    #[inline]
    pub fn gray(value: u8) -> Self {
        Color(value, value, value)
    }
}

impl Color {
    #[inline]
    pub(crate) fn to_rgba(self, alpha: u8) -> Rgba<u8> {
        let Color(r, g, b) = self;
        Rgba([r, g, b, alpha])
    }
}

impl From<(u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color(r, g, b)
    }
}

impl From<Color> for Rgba<u8> {
    #[inline]
    fn from(color: Color) -> Rgba<u8> {
        color.to_rgba(0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let &Color(r, g, b) = self;
        write!(fmt, "#{:0>2x}{:0>2x}{:0>2x}", r, g, b)
    }
}


#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn black_and_white() {
        assert_eq!(Color(0, 0, 0), Color::black());
        assert_eq!(Color(0xff, 0xff, 0xff), Color::white());
        assert_eq!(Color(0x80, 0x80, 0x80), Color::gray(0x80));
    }

    #[test]
    fn display_as_hex() {
        assert_eq!("#ff8000", format!("{}", Color(0xff, 0x80, 0x0)));
        assert_eq!("#000000", format!("{}", Color::black()));
    }
}
