//! Module handling the decoding & encoding of images.
//! This is done by wrapping over the API exposed by several image-related crates.

mod animated_gif;
mod standard;


pub use self::standard::StandardCodec;


use std::io;
use std::time::Duration;

use image::{ImageError, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::resources::SourceError;


/// Capability of turning encoded bytes into frames and back.
pub trait ImageCodec {
    /// Decode the image, given its bytes and possibly a hint about its format
    /// (for when it cannot be detected from the content).
    fn decode(&self, bytes: &[u8], format_hint: Option<ImageFormat>) -> Result<DecodedImage, SourceError>;

    /// Encode the frames as an image of given format.
    /// More than one frame only makes sense for animated formats.
    fn encode(&self, frames: &[Frame], format: ImageFormat) -> Result<Vec<u8>, EncodeError>;
}


/// A single frame of an image, with the time it's shown for.
/// Still images consist of one frame with zero delay.
#[derive(Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub delay: Duration,
}

impl Frame {
    #[inline]
    pub fn new(image: RgbaImage, delay: Duration) -> Self {
        Frame{image, delay}
    }

    #[inline]
    pub fn still(image: RgbaImage) -> Self {
        Self::new(image, Duration::from_millis(0))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (w, h) = self.image.dimensions();
        fmt.debug_struct("Frame")
            .field("image", &format_args!("{}x{}", w, h))
            .field("delay", &self.delay)
            .finish()
    }
}


/// Image loaded from the source, as a sequence of frames.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub frames: Vec<Frame>,
    pub width: u32,
    pub height: u32,
    /// Format that the image was decoded from.
    pub format: ImageFormat,
}

impl DecodedImage {
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// The format that captioned versions of this image are encoded in.
    /// This is usually the same that the image was decoded from.
    pub fn output_format(&self) -> ImageFormat {
        match self.format {
            // These are the formats that we encode natively.
            ImageFormat::Png | ImageFormat::Jpeg => self.format,
            ImageFormat::Gif if self.is_animated() => ImageFormat::Gif,
            _ => DEFAULT_IMAGE_FORMAT,
        }
    }
}

/// Format for images whose source format isn't one we encode.
pub const DEFAULT_IMAGE_FORMAT: ImageFormat = ImageFormat::Png;


/// Compression settings applied when encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compression {
    /// Quality of JPEG output, 1..=100.
    pub jpeg_quality: u8,
    /// Sampling factor for the NeuQuant color quantizer of GIF frames.
    /// Range 1..=30. Lower values mean better quality.
    pub gif_sample_factor: i32,
}

impl Default for Compression {
    fn default() -> Self {
        Compression{
            jpeg_quality: 85,
            gif_sample_factor: 12,
        }
    }
}


/// Error that may occur while encoding the captioned image.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode image: {0}")]
    Image(#[from] ImageError),
    #[error("cannot encode GIF: {0}")]
    Gif(#[from] gif::EncodingError),
    #[error("I/O error while encoding: {0}")]
    Io(#[from] io::Error),
    /// Image doesn't fit within the limits of the output format.
    #[error("image of {width}x{height} is too large for {format:?}")]
    TooLarge { width: u32, height: u32, format: ImageFormat },
    #[error("encoding {0:?} images is not supported")]
    Unsupported(ImageFormat),
    #[error("no frames to encode")]
    NoFrames,
}
