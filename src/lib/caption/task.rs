//! Module implementing the actual captioning task:
//! stacking the bands and the image, frame by frame.

use image::{imageops, RgbaImage};

use crate::codec::Frame;
use crate::resources::Font;
use super::band::{Band, Overlay};


/// Represents the compositing of a single captioned image
/// and contains all the relevant logic.
pub(super) struct CaptionTask<'c> {
    pub top: &'c Band,
    pub bottom: Option<&'c Band>,
    pub overlay: Option<&'c Overlay>,
    pub font: &'c Font,
}

impl<'c> CaptionTask<'c> {
    /// Composite all the frames, keeping their order & delays.
    pub fn perform(&self, frames: &[Frame]) -> Vec<Frame> {
        debug!("Compositing {} frame(s)", frames.len());
        frames.iter().enumerate()
            .map(|(i, frame)| {
                trace!("Compositing frame #{}", i + 1);
                Frame::new(self.compose(&frame.image), frame.delay)
            })
            .collect()
    }

    /// Put the bands around a single frame's image.
    fn compose(&self, image: &RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        let top_height = self.top.height();
        let bottom_height = self.bottom.map(|b| b.height()).unwrap_or(0);

        let mut canvas = RgbaImage::new(width, top_height + height + bottom_height);
        imageops::replace(&mut canvas, self.top.image(), 0, 0);
        imageops::replace(&mut canvas, image, 0, top_height as i64);
        if let Some(bottom) = self.bottom {
            imageops::replace(&mut canvas, bottom.image(), 0, (top_height + height) as i64);
        }
        if let Some(overlay) = self.overlay {
            overlay.draw(&mut canvas, self.font, top_height, height);
        }
        canvas
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;
    use image::{Rgba, RgbaImage};
    use crate::codec::Frame;
    use crate::model::{Color, FontStyle};
    use crate::resources::{FontLoader, Loader};
    use super::super::band::{Band, Edge};
    use super::CaptionTask;

    #[test]
    fn frames_keep_order_and_delays() {
        let font = FontLoader::default().load(FontStyle::default()).unwrap();
        let top = Band::render(&font, "top", (40, 30), Color::black(), Color::white(),
                               None, Edge::Bottom);
        let bottom = Band::render(&font, "bottom", (40, 30), Color::black(), Color::white(),
                                  None, Edge::Top);
        let task = CaptionTask{top: &top, bottom: Some(&bottom), overlay: None, font: &font};

        let frames = vec![
            Frame::new(RgbaImage::from_pixel(40, 30, Rgba([255, 0, 0, 255])), Duration::from_millis(70)),
            Frame::new(RgbaImage::from_pixel(40, 30, Rgba([0, 0, 255, 255])), Duration::from_millis(30)),
        ];
        let result = task.perform(&frames);

        assert_eq!(2, result.len());
        assert_eq!(Duration::from_millis(70), result[0].delay);
        assert_eq!(Duration::from_millis(30), result[1].delay);
        for (frame, &color) in result.iter().zip([[255, 0, 0, 255], [0, 0, 255, 255]].iter()) {
            assert_eq!((40, top.height() + 30 + bottom.height()), frame.image.dimensions());
            assert_eq!(&Rgba(color), frame.image.get_pixel(0, top.height()));
            assert_eq!(&Rgba(color), frame.image.get_pixel(39, top.height() + 29));
            assert_eq!(&Rgba([255, 255, 255, 255]), frame.image.get_pixel(0, top.height() + 30));
        }
    }
}
