//! Fitting caption text into a band: font size search & greedy word wrapping.

use std::cmp::{max, min};

use super::metrics::FontMetrics;


/// Space between the top of the band and the first line of text.
pub const TOP_PADDING: u32 = 10;
/// Space between the last line of text and the bottom of the band.
pub const BOTTOM_PADDING: u32 = 10;
/// Horizontal space reserved on the band besides the text.
pub const WIDTH_PADDING: u32 = 10;
/// Smallest font size that a band would normally start at.
pub const MINIMUM_FONT_SIZE: u32 = 13;
/// Smallest font size the search can go down to when a single word doesn't fit.
pub const ABSOLUTE_MINIMUM_FONT_SIZE: u32 = 6;
/// Bands are never shorter than this.
pub const MINIMUM_BAND_HEIGHT: u32 = 32;

const WIDTH_TO_FONT_SIZE: u32 = 16;
const HEIGHT_TO_FONT_SIZE: u32 = 6;


/// Text of a single band, wrapped to fit the image width.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub font_size: f32,
    /// Final lines of text, each at most as wide as the available width
    /// unless it is a single glyph that is wider on its own.
    /// Blank lines are kept.
    pub lines: Vec<String>,
    pub line_height: f32,
    pub ascent: f32,
}

impl TextLayout {
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height of all the lines stacked together.
    pub fn text_height(&self) -> u32 {
        (self.lines.len() as f32 * self.line_height).ceil() as u32
    }

    /// Height of a band that holds this text, including its padding.
    pub fn band_height(&self) -> u32 {
        max(self.text_height() + TOP_PADDING + BOTTOM_PADDING, MINIMUM_BAND_HEIGHT)
    }
}


/// Font size that the search for a fitting one starts from,
/// for an image of given dimensions.
pub fn starting_font_size(width: u32, height: u32) -> u32 {
    let by_width = max(width / WIDTH_TO_FONT_SIZE, MINIMUM_FONT_SIZE);
    let cap = max(height / HEIGHT_TO_FONT_SIZE, MINIMUM_FONT_SIZE);
    min(by_width, cap)
}

/// Lay out the text for a band of an image with given dimensions.
///
/// Picks the largest font size at which no wrapped line is wider than
/// the image width minus `WIDTH_PADDING`. The same size applies to every line.
pub fn layout<M: FontMetrics + ?Sized>(metrics: &M, text: &str,
                                       width: u32, height: u32) -> TextLayout {
    let available = max(width.saturating_sub(WIDTH_PADDING), 1) as f32;
    let start = starting_font_size(width, height);
    trace!("Laying out text of length {} within {}px, starting at font size {}",
        text.len(), available, start);

    let mut fitting = None;
    for size in (ABSOLUTE_MINIMUM_FONT_SIZE..=start).rev() {
        let lines = wrap_text(metrics, text, size as f32, available);
        if fits(metrics, &lines, size as f32, available) {
            if size < MINIMUM_FONT_SIZE {
                debug!("Text only fits below the minimum font size, at {}", size);
            }
            fitting = Some((size, lines));
            break;
        }
        trace!("Text doesn't fit at font size {}", size);
    }

    let (size, lines) = fitting.unwrap_or_else(|| {
        let size = ABSOLUTE_MINIMUM_FONT_SIZE;
        warn!("Text has a word too wide for {}px even at font size {}, splitting it",
            available, size);
        let lines = wrap_text(metrics, text, size as f32, available);
        (size, split_wide_lines(metrics, lines, size as f32, available))
    });

    let font_size = size as f32;
    let result = TextLayout{
        font_size,
        line_height: metrics.line_height(font_size),
        ascent: metrics.ascent(font_size),
        lines,
    };
    debug!("Text laid out in {} line(s) at font size {}", result.line_count(), size);
    result
}

/// Wrap the text so that it fits given width, if possible.
///
/// Explicit line breaks are kept and every explicit line is wrapped on its own.
/// A word that is too wide by itself ends up alone on its line.
pub fn wrap_text<M: FontMetrics + ?Sized>(metrics: &M, text: &str,
                                          size: f32, width: f32) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_line(metrics, line, size, width))
        .collect()
}

/// Greedily wrap a single line (without explicit line breaks).
fn wrap_line<M: FontMetrics + ?Sized>(metrics: &M, line: &str,
                                      size: f32, width: f32) -> Vec<String> {
    let mut result = vec![];
    let mut current = String::new();
    for word in line.split(' ').filter(|w| !w.is_empty()) {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if metrics.text_width(&candidate, size) <= width {
            current = candidate;
        } else {
            result.push(current);
            current = word.to_owned();
        }
    }
    // This also keeps a blank line when there are no words at all.
    if !current.is_empty() || result.is_empty() {
        result.push(current);
    }
    result
}

fn fits<M: FontMetrics + ?Sized>(metrics: &M, lines: &[String], size: f32, width: f32) -> bool {
    lines.iter().all(|line| metrics.text_width(line, size) <= width)
}

/// Break lines which are still too wide at character boundaries.
///
/// Every resulting line has at least one character, so a glyph wider than
/// the whole available width still gets a line of its own.
fn split_wide_lines<M: FontMetrics + ?Sized>(metrics: &M, lines: Vec<String>,
                                             size: f32, width: f32) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());
    for line in lines {
        if metrics.text_width(&line, size) <= width {
            result.push(line);
            continue;
        }
        let mut current = String::new();
        for c in line.chars() {
            current.push(c);
            if current.chars().count() > 1 && metrics.text_width(&current, size) > width {
                current.pop();
                result.push(current);
                current = c.to_string();
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
    }
    result
}
