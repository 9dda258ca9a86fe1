//! Module defining the model types.

mod color;
mod config;
mod source;
mod style;

pub use self::color::Color;
pub use self::config::{CaptionConfig, CaptionRequest, ConfigError};
pub use self::source::ImageSource;
pub use self::style::FontStyle;
