//! Module responsible for measuring, laying out, and rendering caption text.

mod layout;
mod metrics;
mod render;


pub use self::layout::{layout, starting_font_size, wrap_text, TextLayout,
                       ABSOLUTE_MINIMUM_FONT_SIZE, BOTTOM_PADDING, MINIMUM_BAND_HEIGHT,
                       MINIMUM_FONT_SIZE, TOP_PADDING, WIDTH_PADDING};
pub use self::metrics::{check, FontMetrics};
pub use self::render::{render_layout, render_line, Style};
