//! Caption bands: the text areas stacked above & below the image.

use std::fmt;

use image::{Rgba, RgbaImage};

use crate::model::Color;
use crate::resources::Font;
use crate::text::{self, Style, TextLayout, BOTTOM_PADDING, TOP_PADDING};


/// Thickness of the line separating a band from the image.
pub const SEPARATOR_THICKNESS: u32 = 2;


/// Which edge of a band touches the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}


/// A rendered caption band.
///
/// Bands are rendered once and then copied onto every frame of the image.
pub struct Band {
    layout: TextLayout,
    image: RgbaImage,
}

impl Band {
    /// Render a band for an image of given dimensions.
    ///
    /// `separator` is the color of the line drawn along the `image_edge`, if any.
    pub fn render(font: &Font, text: &str, (width, height): (u32, u32),
                  font_color: Color, background: Color,
                  separator: Option<Color>, image_edge: Edge) -> Self {
        let layout = text::layout(&**font, text, width, height);
        let band_height = layout.band_height();
        trace!("Rendering {}x{} band with {} line(s) at font size {}",
            width, band_height, layout.line_count(), layout.font_size);

        let mut image = RgbaImage::from_pixel(width, band_height, background.into());
        if let Some(color) = separator {
            draw_separator(&mut image, color, image_edge);
        }
        let style = Style::new(font, layout.font_size, font_color);
        text::render_layout(&mut image, &layout, 0, band_height, &style);

        Band{layout, image}
    }
}

impl Band {
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }
}

impl fmt::Debug for Band {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (w, h) = self.image.dimensions();
        fmt.debug_struct("Band")
            .field("image", &format_args!("{}x{}", w, h))
            .field("layout", &self.layout)
            .finish()
    }
}

fn draw_separator(image: &mut RgbaImage, color: Color, edge: Edge) {
    let (width, height) = image.dimensions();
    let thickness = SEPARATOR_THICKNESS.min(height);
    let rows = match edge {
        Edge::Top => 0..thickness,
        Edge::Bottom => height - thickness..height,
    };
    let pixel: Rgba<u8> = color.into();
    for y in rows {
        for x in 0..width {
            image.put_pixel(x, y, pixel);
        }
    }
}


/// Bottom text drawn directly over the image, without a band of its own.
#[derive(Debug)]
pub struct Overlay {
    layout: TextLayout,
    color: Color,
}

impl Overlay {
    pub fn new(font: &Font, text: &str, (width, height): (u32, u32), color: Color) -> Self {
        let layout = text::layout(&**font, text, width, height);
        Overlay{layout, color}
    }

    /// Draw the text over the image region that starts at row `image_top`
    /// and is `image_height` tall.
    pub fn draw(&self, canvas: &mut RgbaImage, font: &Font, image_top: u32, image_height: u32) {
        let text_height = self.layout.text_height();
        let bottom = image_top + image_height;
        let top = bottom.saturating_sub(text_height + BOTTOM_PADDING)
            .max(image_top + TOP_PADDING);
        let style = Style::new(font, self.layout.font_size, self.color);
        text::render_layout(canvas, &self.layout, top, text_height, &style);
    }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use crate::model::{Color, FontStyle};
    use crate::resources::{FontLoader, Loader};
    use super::{Band, Edge, Overlay};

    #[test]
    fn band_spans_the_width() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let band = Band::render(&font, "Me:", (320, 240), Color::black(), Color::white(),
                                None, Edge::Bottom);
        assert_eq!(320, band.image().width());
        assert_eq!(band.layout().band_height(), band.height());
        assert_eq!(&Rgba([255, 255, 255, 255]), band.image().get_pixel(0, 0));
    }

    #[test]
    fn separator_on_image_edge() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let red = Color(255, 0, 0);

        let top = Band::render(&font, "top", (100, 100), Color::black(), Color::white(),
                               Some(red), Edge::Bottom);
        let h = top.height();
        assert_eq!(&Rgba([255, 0, 0, 255]), top.image().get_pixel(50, h - 1));
        assert_eq!(&Rgba([255, 0, 0, 255]), top.image().get_pixel(50, h - 2));
        assert_eq!(&Rgba([255, 255, 255, 255]), top.image().get_pixel(0, h - 3));

        let bottom = Band::render(&font, "bottom", (100, 100), Color::black(), Color::white(),
                                  Some(red), Edge::Top);
        assert_eq!(&Rgba([255, 0, 0, 255]), bottom.image().get_pixel(50, 0));
        assert_eq!(&Rgba([255, 0, 0, 255]), bottom.image().get_pixel(50, 1));
        assert_eq!(&Rgba([255, 255, 255, 255]), bottom.image().get_pixel(0, 2));
    }

    #[test]
    fn overlay_draws_near_the_bottom() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let overlay = Overlay::new(&font, "bottom text", (200, 200), Color::black());
        let mut canvas = RgbaImage::from_pixel(200, 250, Rgba([255, 255, 255, 255]));
        overlay.draw(&mut canvas, &font, 50, 200);

        let dark_row = |y: u32| (0..200).any(|x| canvas.get_pixel(x, y)[0] < 200);
        assert!(!(0..150).any(|y| dark_row(y)));
        assert!((150..250).any(|y| dark_row(y)));
    }
}
