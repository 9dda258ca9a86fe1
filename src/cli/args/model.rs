//! Data structures for command-line arguments.

use std::io;
use std::path::PathBuf;

use clap;
use dankcap::{CaptionConfig, ColorParseError, ImageSource};
use serde_json;
use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// The image to caption.
    pub source: ImageSource,
    /// Text of the top caption.
    pub text: String,
    /// Name of the output file, without the extension.
    ///
    /// If absent, a timestamp is used.
    pub filename: Option<String>,
    /// Styling of the caption(s),
    /// merged from the --style file and the individual flags.
    pub config: CaptionConfig,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    #[error("invalid arguments: {0}")]
    Parse(#[from] clap::Error),
    /// Color flag with a value that isn't a color.
    #[error("invalid value of --{flag}: {error}")]
    Color {
        flag: &'static str,
        #[source] error: ColorParseError,
    },
    /// --style file that couldn't be read.
    #[error("cannot read style file {}: {source}", path.display())]
    StyleFile {
        path: PathBuf,
        #[source] source: io::Error,
    },
    /// --style file with invalid JSON.
    #[error("style file {} is invalid: {source}", path.display())]
    StyleJson {
        path: PathBuf,
        #[source] source: serde_json::Error,
    },
}
