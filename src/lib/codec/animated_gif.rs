//! Module handling the encoding of (animated) GIFs.

use std::borrow::Cow;
use std::cmp::max;
use std::convert::TryFrom;
use std::io::Write;

use color_quant::NeuQuant;
use gif::{DisposalMethod, Repeat};
use image::{ImageFormat, RgbaImage};

use super::{EncodeError, Frame};


const RGBA_SIZE_BYTES: usize = 4;
const PALETTE_SIZE: usize = 256;


/// Most pixels the palette is trained on, across all frames.
const MAX_TRAINING_PIXELS: usize = 1 << 20;


/// Encode the frames as an infinitely looping GIF animation.
///
/// All frames share one global palette, so pixels that are the same
/// in every frame (like the caption bands) come out the same as well.
pub fn encode<W: Write>(frames: &[Frame], sample_factor: i32, output: W) -> Result<(), EncodeError> {
    let first = frames.first().ok_or(EncodeError::NoFrames)?;
    let (width, height) = first.image.dimensions();
    let too_large = || EncodeError::TooLarge{width, height, format: ImageFormat::Gif};
    let gif_width = u16::try_from(width).map_err(|_| too_large())?;
    let gif_height = u16::try_from(height).map_err(|_| too_large())?;

    let palette = Palette::train(frames, sample_factor);
    let mut encoder = gif::Encoder::new(output, gif_width, gif_height, &palette.colors())?;
    encoder.set_repeat(Repeat::Infinite)?;

    for (i, frame) in frames.iter().enumerate() {
        trace!("Writing frame #{} ({:?})", i + 1, frame.delay);
        let gif_frame = gif::Frame{
            width: gif_width,
            height: gif_height,
            delay: delay_centiseconds(frame),
            dispose: DisposalMethod::Background,
            transparent: palette.transparent,
            palette: None,
            buffer: Cow::Owned(palette.index_image(&frame.image)),
            ..gif::Frame::default()
        };
        encoder.write_frame(&gif_frame)?;
    }

    encoder.into_inner()?;
    Ok(())
}

/// GIF delay unit is 10ms.
fn delay_centiseconds(frame: &Frame) -> u16 {
    let cs = (frame.delay.as_millis() as f64 / 10.0).round();
    cs.min(u16::MAX as f64) as u16
}


/// Color palette shared by all frames of an animation.
pub struct Palette {
    quantizer: NeuQuant,
    /// Palette index standing for fully transparent pixels, if any frame has them.
    pub transparent: Option<u8>,
}

impl Palette {
    /// Train the NeuQuant quantizer on pixels sampled evenly from all the frames.
    pub fn train(frames: &[Frame], sample_factor: i32) -> Self {
        let total: usize = frames.iter().map(|f| f.image.width() as usize * f.image.height() as usize).sum();
        let stride = max(1, total / MAX_TRAINING_PIXELS);
        trace!("Training GIF palette on every {} pixel(s) of {} frame(s)", stride, frames.len());

        let mut training = Vec::with_capacity(total / stride * RGBA_SIZE_BYTES);
        let mut transparent_color = None;
        for frame in frames {
            for pix in frame.image.as_raw().chunks(RGBA_SIZE_BYTES).step_by(stride) {
                training.extend_from_slice(&opaque(pix));
            }
            if transparent_color.is_none() {
                transparent_color = frame.image.pixels().find(|p| p.0[3] == 0).map(|p| p.0);
            }
        }

        let quantizer = NeuQuant::new(sample_factor, PALETTE_SIZE, &training[..]);
        let transparent = transparent_color.map(|t| quantizer.index_of(&t) as u8);
        Palette{quantizer, transparent}
    }

    /// Contiguous buffer of RGB colors, as expected by the GIF encoder.
    pub fn colors(&self) -> Vec<u8> {
        self.quantizer.color_map_rgb()
    }

    /// Map every pixel of the image onto its palette index.
    pub fn index_image(&self, image: &RgbaImage) -> Vec<u8> {
        image.as_raw().chunks(RGBA_SIZE_BYTES)
            .map(|pix| match self.transparent {
                Some(index) if pix[3] == 0 => index,
                _ => self.quantizer.index_of(&opaque(pix)) as u8,
            })
            .collect()
    }
}

/// Pixel with any non-zero alpha treated as fully opaque.
fn opaque(pix: &[u8]) -> [u8; RGBA_SIZE_BYTES] {
    let alpha = if pix[3] != 0 { 0xff } else { 0 };
    [pix[0], pix[1], pix[2], alpha]
}


#[cfg(test)]
mod tests {
    use std::time::Duration;
    use image::{Rgba, RgbaImage};
    use super::{delay_centiseconds, encode, Frame, Palette};

    #[test]
    fn delays_are_rounded_to_centiseconds() {
        let frame = |ms| Frame::new(RgbaImage::new(1, 1), Duration::from_millis(ms));
        assert_eq!(0, delay_centiseconds(&frame(0)));
        assert_eq!(10, delay_centiseconds(&frame(100)));
        assert_eq!(7, delay_centiseconds(&frame(66)));
        assert_eq!(u16::MAX, delay_centiseconds(&frame(10_000_000)));
    }

    #[test]
    fn palette_keeps_transparency() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let palette = Palette::train(&[Frame::still(img.clone())], 10);
        assert_eq!(256 * 3, palette.colors().len());

        let indices = palette.index_image(&img);
        assert_eq!(16, indices.len());
        assert_eq!(palette.transparent, Some(indices[0]));
    }

    #[test]
    fn same_pixels_get_same_indices_in_every_frame() {
        let frame = |color| {
            let mut img = RgbaImage::from_pixel(16, 16, Rgba(color));
            for x in 0..16 {
                for y in 0..4 {
                    img.put_pixel(x, y, Rgba([250, 250, 250, 255]));
                }
            }
            Frame::still(img)
        };
        let frames = vec![frame([255, 0, 0, 255]), frame([0, 90, 200, 255]), frame([30, 30, 30, 255])];
        let palette = Palette::train(&frames, 1);

        let band = |f: &Frame| palette.index_image(&f.image)[..16 * 4].to_vec();
        assert_eq!(band(&frames[0]), band(&frames[1]));
        assert_eq!(band(&frames[0]), band(&frames[2]));
    }

    #[test]
    fn nothing_to_encode() {
        assert!(encode(&[], 12, vec![]).is_err());
    }

    #[test]
    fn oversized_frames() {
        let frames = vec![Frame::still(RgbaImage::new(70_000, 1))];
        assert!(encode(&frames, 12, vec![]).is_err());
    }
}
