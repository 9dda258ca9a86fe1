//! Rendering text onto images.

use std::fmt;

use image::{Pixel, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::model::Color;
use super::layout::TextLayout;
use super::metrics::FontMetrics;


/// Style that the text is rendered with.
pub struct Style<'f> {
    font: &'f Font<'f>,
    size: f32,
    color: Color,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font, size: f32, color: Color) -> Self {
        debug_assert!(size > 0.0, "text::Style got non-positive size ({})", size);
        Style{font, size, color}
    }

    #[inline]
    pub fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &"Font{}")  // we don't have any displayable info here
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}


/// Renders a line of text onto given image, with the glyphs' baseline at `(x, y)`.
///
/// Text should be single-line and short enough to fit (or it will be clipped).
pub fn render_line(img: &mut RgbaImage, s: &str, x: f32, y: f32, style: &Style) {
    trace!("render_line(..., {:?}, {}, {}, {:?})", s, x, y, style);
    let (width, height) = img.dimensions();

    for glyph in style.font.layout(s, style.scale(), point(x, y)) {
        if let Some(bbox) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = bbox.min.x + gx as i32;
                let py = bbox.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (v.min(1.0) * 255.0) as u8;
                img.get_pixel_mut(px as u32, py as u32)
                    .blend(&style.color.to_rgba(alpha));
            });
        }
    }
}

/// Renders the laid out text onto given image, in the band that starts
/// at `band_top` row and has the given height.
///
/// Lines are centered horizontally and the whole text block vertically.
pub fn render_layout(img: &mut RgbaImage, layout: &TextLayout,
                     band_top: u32, band_height: u32, style: &Style) {
    let width = img.width() as f32;
    let text_height = layout.text_height();
    let offset = band_height.saturating_sub(text_height) / 2;
    trace!("Rendering {} line(s) at {}px below the band top (row {})",
        layout.line_count(), offset, band_top);

    let mut y = (band_top + offset) as f32 + layout.ascent;
    for line in &layout.lines {
        if !line.is_empty() {
            let line_width = style.font.text_width(line, style.size);
            let x = ((width - line_width) / 2.0).max(0.0);
            render_line(img, line, x, y, style);
        }
        y += layout.line_height;
    }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use crate::model::{Color, FontStyle};
    use crate::resources::{FontLoader, Loader};
    use crate::text::layout;
    use super::{render_layout, render_line, Style};

    #[test]
    fn line_is_drawn_in_color() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let mut img = RgbaImage::from_pixel(200, 50, Rgba([255, 255, 255, 255]));
        render_line(&mut img, "Hello", 10.0, 35.0, &Style::new(&font, 30.0, Color::black()));
        assert!(img.pixels().any(|p| p[0] < 128));
    }

    #[test]
    fn clipping_does_not_panic() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let mut img = RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255]));
        render_line(&mut img, "Way too long for this", -5.0, 8.0,
                    &Style::new(&font, 40.0, Color::black()));
    }

    #[test]
    fn text_stays_inside_the_band() {
        let font = FontLoader::default().load(FontStyle::new(true, false)).unwrap();
        let text_layout = layout(&*font, "Top text\nsecond line", 300, 200);
        let band_height = text_layout.band_height();

        let mut img = RgbaImage::from_pixel(300, band_height + 100, Rgba([255, 255, 255, 255]));
        render_layout(&mut img, &text_layout, 0, band_height,
                      &Style::new(&font, text_layout.font_size, Color::black()));

        let dark_row = |y: u32| (0..300).any(|x| img.get_pixel(x, y)[0] < 200);
        assert!((0..band_height).any(|y| dark_row(y)));
        assert!(!(band_height..band_height + 100).any(|y| dark_row(y)));
    }
}
