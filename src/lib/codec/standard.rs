//! Codec backed by the `image` crate, with GIF encoding done through `gif`.

use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{self, AnimationDecoder, ColorType, ImageEncoder, ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::resources::SourceError;
use super::{animated_gif, Compression, DecodedImage, EncodeError, Frame, ImageCodec};


/// The default `ImageCodec`.
#[derive(Clone, Debug, Default)]
pub struct StandardCodec {
    compression: Compression,
}

impl StandardCodec {
    #[inline]
    pub fn new(compression: Compression) -> Self {
        StandardCodec{compression}
    }

    #[inline]
    pub fn compression(&self) -> &Compression {
        &self.compression
    }
}

impl ImageCodec for StandardCodec {
    fn decode(&self, bytes: &[u8], format_hint: Option<ImageFormat>) -> Result<DecodedImage, SourceError> {
        let format = match image::guess_format(bytes).ok().or(format_hint) {
            Some(format) => format,
            None => {
                // Let the image crate produce a proper error for unknown content.
                let img = image::load_from_memory(bytes).map_err(SourceError::Decode)?;
                return Ok(still_image(img.to_rgba8(), ImageFormat::Png));
            }
        };
        trace!("Decoding {} byte(s) of {:?} image", bytes.len(), format);

        let decoded = if format == ImageFormat::Gif {
            decode_gif(bytes)?
        } else {
            let img = image::load_from_memory_with_format(bytes, format)
                .map_err(SourceError::Decode)?;
            still_image(img.to_rgba8(), format)
        };
        debug!("Decoded {:?} image: {}x{} with {} frame(s)",
            decoded.format, decoded.width, decoded.height, decoded.frame_count());
        Ok(decoded)
    }

    fn encode(&self, frames: &[Frame], format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
        let first = frames.first().ok_or(EncodeError::NoFrames)?;
        let (width, height) = first.image.dimensions();
        debug!("Encoding {} frame(s) of {}x{} as {:?}...", frames.len(), width, height, format);

        let mut result = vec![];
        match format {
            ImageFormat::Png => {
                trace!("Writing PNG image");
                PngEncoder::new_with_quality(&mut result, CompressionType::Best, FilterType::Adaptive)
                    .write_image(first.image.as_raw(), width, height, ColorType::Rgba8)?;
            }
            ImageFormat::Jpeg => {
                let quality = self.compression.jpeg_quality;
                trace!("Writing JPEG with quality {}", quality);
                let rgb = flatten(&first.image);
                JpegEncoder::new_with_quality(&mut result, quality)
                    .encode(rgb.as_raw(), width, height, ColorType::Rgb8)?;
            }
            ImageFormat::Gif => {
                trace!("Writing GIF with {} frame(s)", frames.len());
                animated_gif::encode(frames, self.compression.gif_sample_factor, &mut result)?;
            }
            f => return Err(EncodeError::Unsupported(f)),
        }

        trace!("Encoded image is {} byte(s) long", result.len());
        Ok(result)
    }
}

fn still_image(image: RgbaImage, format: ImageFormat) -> DecodedImage {
    let (width, height) = image.dimensions();
    DecodedImage{frames: vec![Frame::still(image)], width, height, format}
}

fn decode_gif(bytes: &[u8]) -> Result<DecodedImage, SourceError> {
    // The decoder composites the frames, applying their disposal methods,
    // so every frame is a full picture of the animation at that moment.
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(SourceError::Decode)?;
    let frames: Vec<Frame> = decoder.into_frames().collect_frames()
        .map_err(SourceError::Decode)?
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = Duration::from_micros(numer as u64 * 1000 / denom.max(1) as u64);
            Frame::new(frame.into_buffer(), delay)
        })
        .collect();

    let (width, height) = frames.first()
        .map(|f| f.image.dimensions())
        .ok_or(SourceError::Empty)?;
    Ok(DecodedImage{frames, width, height, format: ImageFormat::Gif})
}

/// Flatten the image onto a white background, for formats without alpha.
fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let blend = |c: u8| ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
