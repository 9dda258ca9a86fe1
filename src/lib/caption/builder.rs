//! Module implementing the builder for `Captioner`.

use std::path::PathBuf;

use crate::codec::{Compression, ImageCodec, StandardCodec};
use crate::model::{CaptionConfig, Color, ImageSource};
use super::captioner::Captioner;
use super::error::CaptionError;


/// Builder for `Captioner`.
///
/// Every setter corresponds to a field of `CaptionConfig`;
/// those that aren't called keep their defaults.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<C: ImageCodec = StandardCodec> {
    source: ImageSource,
    top_text: String,
    config: CaptionConfig,
    codec: C,
}

impl Builder<StandardCodec> {
    /// Create a new `Builder`.
    #[inline]
    pub fn new<S, T>(source: S, top_text: T) -> Self
        where S: Into<ImageSource>, T: Into<String>
    {
        Builder{
            source: source.into(),
            top_text: top_text.into(),
            config: CaptionConfig::default(),
            codec: StandardCodec::default(),
        }
    }

    /// Change the compression settings of the standard codec.
    #[inline]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.codec = StandardCodec::new(compression); self
    }

    /// Set the quality percentage of JPEG output.
    pub fn jpeg_quality(self, quality: u8) -> Self {
        let clamped = quality.max(1).min(100);
        if clamped != quality {
            warn!("JPEG quality {} out of range, using {}", quality, clamped);
        }
        let compression = Compression{jpeg_quality: clamped, ..*self.codec.compression()};
        self.compression(compression)
    }
}

// Setters.
impl<C: ImageCodec> Builder<C> {
    /// Replace the whole configuration at once.
    #[inline]
    pub fn config(mut self, config: CaptionConfig) -> Self {
        self.config = config; self
    }

    #[inline]
    pub fn bottom_text<T: Into<String>>(mut self, text: T) -> Self {
        self.config.bottom_text = Some(text.into()); self
    }

    #[inline]
    pub fn top_font_color(mut self, color: Color) -> Self {
        self.config.top_font_color = color; self
    }

    #[inline]
    pub fn top_background_color(mut self, color: Color) -> Self {
        self.config.top_background_color = color; self
    }

    #[inline]
    pub fn bottom_font_color(mut self, color: Color) -> Self {
        self.config.bottom_font_color = color; self
    }

    #[inline]
    pub fn bottom_background_color(mut self, color: Color) -> Self {
        self.config.bottom_background_color = color; self
    }

    /// Whether the bottom text gets its own band (true)
    /// or is drawn over the image (false).
    #[inline]
    pub fn bottom_text_box(mut self, value: bool) -> Self {
        self.config.bottom_text_box = value; self
    }

    #[inline]
    pub fn separator_line(mut self, value: bool) -> Self {
        self.config.separator_line = value; self
    }

    #[inline]
    pub fn separator_line_color(mut self, color: Color) -> Self {
        self.config.separator_line_color = color; self
    }

    #[inline]
    pub fn bold(mut self, value: bool) -> Self {
        self.config.bold = value; self
    }

    #[inline]
    pub fn italic(mut self, value: bool) -> Self {
        self.config.italic = value; self
    }

    /// Use a TrueType font file instead of the built-in font.
    #[inline]
    pub fn font<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.font = Some(path.into()); self
    }

    /// Use a custom codec for decoding & encoding the image.
    #[inline]
    pub fn codec<D: ImageCodec>(self, codec: D) -> Builder<D> {
        Builder{
            source: self.source,
            top_text: self.top_text,
            config: self.config,
            codec,
        }
    }
}

// Building.
impl<C: ImageCodec> Builder<C> {
    /// Build the `Captioner`, which loads everything it needs.
    pub fn build(self) -> Result<Captioner<C>, CaptionError> {
        Captioner::with_codec(self.source, self.top_text, self.config, self.codec)
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::model::{Color, ImageSource};
    use super::Builder;

    #[test]
    fn setters_fill_the_config() {
        let builder = Builder::new("yesbutno.jpg", "top")
            .bottom_text("bottom")
            .bottom_text_box(false)
            .separator_line(true)
            .separator_line_color(Color(1, 2, 3))
            .top_background_color(Color::black())
            .top_font_color(Color::white())
            .bold(true)
            .italic(true)
            .font("fonts/Impact.ttf");

        assert_eq!(ImageSource::Path(PathBuf::from("yesbutno.jpg")), builder.source);
        let config = &builder.config;
        assert_eq!(Some("bottom".to_owned()), config.bottom_text);
        assert!(!config.bottom_text_box);
        assert!(config.separator_line);
        assert_eq!(Color(1, 2, 3), config.separator_line_color);
        assert_eq!(Color::black(), config.top_background_color);
        assert_eq!(Color::white(), config.top_font_color);
        assert!(config.style().bold && config.style().italic);
        assert_eq!(Some(PathBuf::from("fonts/Impact.ttf")), config.font);
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        let builder = Builder::new(vec![0u8], "top").jpeg_quality(0);
        assert_eq!(1, builder.codec.compression().jpeg_quality);
        let builder = builder.jpeg_quality(120);
        assert_eq!(100, builder.codec.compression().jpeg_quality);
    }
}
