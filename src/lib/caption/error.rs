//! Captioning error.

use thiserror::Error;

use crate::codec::EncodeError;
use crate::model::ConfigError;
use crate::resources::{FontError, SourceError};


/// Error that may occur during the captioning.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// The image cannot be read, fetched, or decoded.
    #[error("cannot load image: {0}")]
    SourceNotFound(#[from] SourceError),
    /// The font (or its requested style variant) cannot be loaded.
    #[error("cannot load font: {0}")]
    FontLoad(#[from] FontError),
    /// The captioned image cannot be encoded or written.
    #[error("failed to encode the final image: {0}")]
    Encoding(#[from] EncodeError),
    /// The caption request is invalid.
    #[error("invalid caption: {0}")]
    Config(#[from] ConfigError),
    /// The `Captioner` has already been closed.
    #[error("captioner has been closed")]
    Closed,
}
