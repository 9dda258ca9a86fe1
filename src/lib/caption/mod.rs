//! Module implementing image captioning.

mod band;
mod builder;
mod captioner;
mod error;
mod output;
mod task;


pub use self::band::SEPARATOR_THICKNESS;
pub use self::builder::Builder as CaptionerBuilder;
pub use self::captioner::Captioner;
pub use self::error::CaptionError;
pub use self::output::CaptionOutput;
