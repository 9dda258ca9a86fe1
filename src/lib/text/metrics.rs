//! Measuring text.

use itertools::Itertools;
use rusttype::{point, Font, Scale};


/// Capability of measuring text rendered at a given font size.
///
/// Implemented for `rusttype::Font`; the layout code only ever talks
/// to this trait, so it can be exercised without a real font.
pub trait FontMetrics {
    /// Width in pixels of given single line of text.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self, size: f32) -> f32;

    /// Vertical advance between consecutive lines.
    fn line_height(&self, size: f32) -> f32;

    /// Whether the font has an actual glyph (not the `.notdef` one) for the character.
    fn has_glyph(&self, c: char) -> bool;

    /// Characters of the text that the font has no glyphs for, without repeats.
    fn missing_glyphs(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| !c.is_control())
            .filter(|&c| !self.has_glyph(c))
            .unique()
            .collect()
    }
}

impl<'f> FontMetrics for Font<'f> {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        // Text width is the final X position of the "caret"
        // after laying out all the glyphs, starting from X=0.
        self.layout(text, Scale::uniform(size), point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn ascent(&self, size: f32) -> f32 {
        self.v_metrics(Scale::uniform(size)).ascent
    }

    fn line_height(&self, size: f32) -> f32 {
        let v_metrics = self.v_metrics(Scale::uniform(size));
        v_metrics.ascent - v_metrics.descent + v_metrics.line_gap
    }

    fn has_glyph(&self, c: char) -> bool {
        self.glyph(c).id().0 != 0
    }
}


/// Check if given font has all the glyphs for given text.
/// Missing ones are only logged.
pub fn check<M: FontMetrics + ?Sized>(metrics: &M, text: &str) {
    let missing = metrics.missing_glyphs(text);
    if !missing.is_empty() {
        warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
            missing.iter().map(|&c| format!("{:#x}", c as u32)).join(", "));
    }
}
