//! Module which defines the `Captioner`.

use std::fmt;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::codec::{DecodedImage, EncodeError, ImageCodec, StandardCodec};
use crate::model::{CaptionConfig, CaptionRequest, ImageSource};
use crate::resources::{Font, FontFamily, FontLoader, Loader, SourceLoader};
use crate::text;
use super::band::{Band, Edge, Overlay};
use super::builder::Builder;
use super::error::CaptionError;
use super::output::CaptionOutput;
use super::task::CaptionTask;


/// Captions a single image.
///
/// Construction does all the loading: it validates the request, reads (or fetches)
/// and decodes the image, loads the font, and renders the caption bands.
/// The result can then be encoded any number of times with `save` or `to_buffer`.
///
/// The decoded frames are held until the `Captioner` is closed or dropped.
pub struct Captioner<C: ImageCodec = StandardCodec> {
    request: CaptionRequest,
    codec: C,
    info: Info,
    state: Option<Loaded>,
}

/// What is known about the image, even after closing.
#[derive(Clone, Copy, Debug)]
struct Info {
    width: u32,
    height: u32,
    frame_count: usize,
    output_format: ImageFormat,
    top_band_height: u32,
    bottom_band_height: Option<u32>,
}

/// Resources held between construction and closing.
struct Loaded {
    image: DecodedImage,
    font: Font,
    top: Band,
    bottom: Option<Band>,
    overlay: Option<Overlay>,
}

// Constructors.
impl Captioner<StandardCodec> {
    /// Create a `Captioner` for the image from given source, captioned with given text.
    ///
    /// The text may contain the literal `\n` marker for line breaks.
    /// For a more convenient way of configuring the caption, see `Captioner::builder`.
    #[inline]
    pub fn new<S, T>(source: S, top_text: T, config: CaptionConfig) -> Result<Self, CaptionError>
        where S: Into<ImageSource>, T: Into<String>
    {
        Self::with_codec(source, top_text, config, StandardCodec::default())
    }

    /// Start building a `Captioner` for the image from given source.
    #[inline]
    pub fn builder<S, T>(source: S, top_text: T) -> Builder
        where S: Into<ImageSource>, T: Into<String>
    {
        Builder::new(source, top_text)
    }
}

impl<C: ImageCodec> Captioner<C> {
    /// Create a `Captioner` which decodes & encodes images with a custom codec.
    pub fn with_codec<S, T>(source: S, top_text: T,
                            config: CaptionConfig, codec: C) -> Result<Self, CaptionError>
        where S: Into<ImageSource>, T: Into<String>
    {
        let source = source.into();
        let request = CaptionRequest::new(top_text, config)?;
        debug!("Captioning {} with {:?}", source, request);

        let data = SourceLoader::new().load(&source)?;
        drop(source);
        let image = codec.decode(&data.bytes, data.format_hint)?;
        drop(data);

        let config = request.config();
        let font_loader = FontLoader::new(FontFamily::from(config.font.clone()));
        debug!("Loading {} style of the {} font", config.style(), font_loader.family());
        let font = font_loader.load(config.style())?;
        let dimensions = (image.width, image.height);

        trace!("Checking if font `{}` has all glyphs for the caption(s)", font.name());
        text::check(&*font, request.top_text());
        let separator = if config.separator_line { Some(config.separator_line_color) } else { None };
        let top = Band::render(&font, request.top_text(), dimensions,
                               config.top_font_color, config.top_background_color,
                               separator, Edge::Bottom);
        debug!("Top band: {} line(s) at font size {}",
            top.layout().line_count(), top.layout().font_size);

        let bottom_text = request.bottom_text().unwrap_or_default();
        if !bottom_text.is_empty() {
            text::check(&*font, bottom_text);
        }
        let bottom = if request.has_bottom_band() {
            Some(Band::render(&font, bottom_text, dimensions,
                              config.bottom_font_color, config.bottom_background_color,
                              separator, Edge::Top))
        } else {
            None
        };
        let overlay = if request.has_bottom_overlay() {
            debug!("Bottom text will be drawn over the image");
            Some(Overlay::new(&font, bottom_text, dimensions, config.bottom_font_color))
        } else {
            None
        };

        let info = Info{
            width: image.width,
            height: image.height,
            frame_count: image.frame_count(),
            output_format: image.output_format(),
            top_band_height: top.height(),
            bottom_band_height: bottom.as_ref().map(|b| b.height()),
        };
        debug!("Captioner ready: {:?}", info);

        let state = Some(Loaded{image, font, top, bottom, overlay});
        Ok(Captioner{request, codec, info, state})
    }
}

// Output.
impl<C: ImageCodec> Captioner<C> {
    /// Encode the captioned image in memory.
    pub fn to_buffer(&self) -> Result<CaptionOutput, CaptionError> {
        let loaded = self.state.as_ref().ok_or(CaptionError::Closed)?;
        let task = CaptionTask{
            top: &loaded.top,
            bottom: loaded.bottom.as_ref(),
            overlay: loaded.overlay.as_ref(),
            font: &loaded.font,
        };
        let format = self.info.output_format;
        let source_frames = &loaded.image.frames[..];
        // Still formats only get the first frame.
        let source_frames = if format == ImageFormat::Gif {
            source_frames
        } else {
            &source_frames[..source_frames.len().min(1)]
        };
        let frames = task.perform(source_frames);

        let bytes = self.codec.encode(&frames, format)?;
        Ok(CaptionOutput::new(format, bytes))
    }

    /// Encode the captioned image and write it to a file.
    ///
    /// The path is given without an extension; the one matching the output format
    /// is appended to it. Returns the path of the file written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, CaptionError> {
        let output = self.to_buffer()?;
        let path = output.save_to(path).map_err(EncodeError::Io)?;
        Ok(path)
    }

    /// Release the decoded image and the rendered bands.
    ///
    /// Closing more than once is fine. After closing, `save` and `to_buffer` fail.
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            debug!("Captioner closed");
        }
    }
}

impl<C: ImageCodec> Drop for Captioner<C> {
    fn drop(&mut self) {
        self.close();
    }
}

// Accessors.
impl<C: ImageCodec> Captioner<C> {
    #[inline]
    pub fn request(&self) -> &CaptionRequest {
        &self.request
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Dimensions of the source image.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }

    /// Dimensions of the captioned image.
    pub fn output_dimensions(&self) -> (u32, u32) {
        let bands = self.info.top_band_height + self.info.bottom_band_height.unwrap_or(0);
        (self.info.width, self.info.height + bands)
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.info.frame_count
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.info.frame_count > 1
    }

    #[inline]
    pub fn top_band_height(&self) -> u32 {
        self.info.top_band_height
    }

    /// Height of the bottom band, if there is one.
    #[inline]
    pub fn bottom_band_height(&self) -> Option<u32> {
        self.info.bottom_band_height
    }

    #[inline]
    pub fn output_format(&self) -> ImageFormat {
        self.info.output_format
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }
}

impl<C: ImageCodec> fmt::Debug for Captioner<C> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Captioner")
            .field("request", &self.request)
            .field("info", &self.info)
            .field("closed", &self.is_closed())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use crate::model::CaptionConfig;
    use super::{Captioner, CaptionError};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([90, 120, 150, 255]));
        let mut bytes = vec![];
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn captioner_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Captioner>();
    }

    #[test]
    fn invalid_config_fails_before_loading() {
        let result = Captioner::new("surely/missing.png", "", CaptionConfig::default());
        match result {
            Err(CaptionError::Config(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn output_dimensions() {
        let config = CaptionConfig{bottom_text: Some("bottom".into()), ..Default::default()};
        let captioner = Captioner::new(png(120, 80), "top", config).unwrap();
        let bottom = captioner.bottom_band_height().unwrap();
        assert_eq!((120, 80 + captioner.top_band_height() + bottom), captioner.output_dimensions());
        assert_eq!(ImageFormat::Png, captioner.output_format());
        assert!(!captioner.is_animated());
    }

    #[test]
    fn info_survives_closing() {
        let mut captioner = Captioner::new(png(64, 64), "top", CaptionConfig::default()).unwrap();
        captioner.close();
        assert!(captioner.is_closed());
        assert_eq!((64, 64), captioner.dimensions());
        assert_eq!(1, captioner.frame_count());
    }
}
