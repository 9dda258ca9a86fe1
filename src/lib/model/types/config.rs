//! Module implementing the captioning configuration and request types.

use std::path::PathBuf;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::model::constants::{DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT_COLOR,
                              DEFAULT_SEPARATOR_COLOR, LINE_BREAK_MARKER, MAX_CAPTION_LENGTH};
use super::color::Color;
use super::style::FontStyle;


/// Styling options of a captioning operation.
///
/// Every field has a default (see `CaptionConfig::default`),
/// so when deserialized only the fields that differ need to be given.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Text of the second caption, below the image. None by default.
    pub bottom_text: Option<String>,
    /// Text color of the top band. Defaults to black.
    pub top_font_color: Color,
    /// Text color of the bottom band (or overlay). Defaults to black.
    pub bottom_font_color: Color,
    /// Background of the top band. Defaults to white.
    pub top_background_color: Color,
    /// Background of the bottom band. Defaults to white.
    pub bottom_background_color: Color,
    /// Whether the bottom text gets its own band below the image (the default).
    ///
    /// If false, the bottom text is drawn over the bottom edge of the image instead.
    pub bottom_text_box: bool,
    /// Whether to draw a line between the band(s) and the image. Off by default.
    pub separator_line: bool,
    /// Color of the separator line. Defaults to black.
    pub separator_line_color: Color,
    pub italic: bool,
    pub bold: bool,
    /// TrueType font file to use instead of the built-in family.
    ///
    /// Bold and italic variants are looked up next to it
    /// (e.g. `Foo-Bold.ttf` for `Foo.ttf`).
    pub font: Option<PathBuf>,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        CaptionConfig{
            bottom_text: None,
            top_font_color: DEFAULT_FONT_COLOR,
            bottom_font_color: DEFAULT_FONT_COLOR,
            top_background_color: DEFAULT_BACKGROUND_COLOR,
            bottom_background_color: DEFAULT_BACKGROUND_COLOR,
            bottom_text_box: true,
            separator_line: false,
            separator_line_color: DEFAULT_SEPARATOR_COLOR,
            italic: false,
            bold: false,
            font: None,
        }
    }
}

impl CaptionConfig {
    /// Font style selected by the `bold` & `italic` flags.
    #[inline]
    pub fn style(&self) -> FontStyle {
        FontStyle::new(self.bold, self.italic)
    }
}


/// Validated input of a single captioning operation:
/// the top text plus its `CaptionConfig`.
///
/// Texts stored here are normalized: line break markers are turned
/// into actual newlines, and an empty bottom text is treated as absent.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionRequest {
    top_text: String,
    config: CaptionConfig,
}

impl CaptionRequest {
    pub fn new<S: Into<String>>(top_text: S, config: CaptionConfig) -> Result<Self, ConfigError> {
        let top_text = normalize_text(&top_text.into());
        if top_text.trim().is_empty() {
            return Err(ConfigError::EmptyText);
        }
        check_length("top", &top_text)?;

        let mut config = config;
        config.bottom_text = match config.bottom_text.take() {
            Some(ref text) if !text.trim().is_empty() => {
                let text = normalize_text(text);
                check_length("bottom", &text)?;
                Some(text)
            }
            _ => None,
        };

        Ok(CaptionRequest{top_text, config})
    }
}

impl CaptionRequest {
    #[inline]
    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    #[inline]
    pub fn bottom_text(&self) -> Option<&str> {
        self.config.bottom_text.as_ref().map(|s| s.as_str())
    }

    #[inline]
    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Whether the output has a second band below the image.
    #[inline]
    pub fn has_bottom_band(&self) -> bool {
        self.bottom_text().is_some() && self.config.bottom_text_box
    }

    /// Whether the bottom text is drawn directly over the image.
    #[inline]
    pub fn has_bottom_overlay(&self) -> bool {
        self.bottom_text().is_some() && !self.config.bottom_text_box
    }
}

fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(LINE_BREAK_MARKER, "\n")
        .nfc().collect()
}

fn check_length(band: &'static str, text: &str) -> Result<(), ConfigError> {
    let length = text.chars().count();
    if length > MAX_CAPTION_LENGTH {
        return Err(ConfigError::TooLong{band, length});
    }
    Ok(())
}


/// Error for an invalid `CaptionRequest`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Top text is required.
    #[error("top caption text is empty")]
    EmptyText,
    /// Caption text too long.
    #[error("{band} caption text too long: {length} > {max}", max = MAX_CAPTION_LENGTH)]
    TooLong { band: &'static str, length: usize },
}
