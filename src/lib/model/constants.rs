//! Module defining constants relevant to the data model.

use super::types::Color;


/// Default color of the caption text, in both bands.
pub const DEFAULT_FONT_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Default color of the caption band background.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Default color of the line separating a band from the image.
pub const DEFAULT_SEPARATOR_COLOR: Color = Color(0x0, 0x0, 0x0);

/// Maximum length (in Unicode codepoints) of a single caption text.
pub const MAX_CAPTION_LENGTH: usize = 1024;

/// Two-character marker that stands for a line break in caption text.
///
/// Shells make it awkward to pass real newlines, so `\n` typed literally
/// is accepted as well.
pub const LINE_BREAK_MARKER: &str = "\\n";
