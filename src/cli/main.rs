//!
//! dankcli -- Memes in the shell
//!

#[macro_use] extern crate clap;
             extern crate dankcap;
             extern crate exitcode;
#[macro_use] extern crate lazy_static;
             extern crate serde_json;
             extern crate slog;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate slog_term;
             extern crate thiserror;
             extern crate time;

#[cfg(test)] #[macro_use] extern crate spectral;
#[cfg(test)]              extern crate tempfile;

// `log` must be at the end of these declarations because we want to use the standard `log`
// macros, which the (unused) macros of other crates could otherwise shadow.
#[macro_use] extern crate log;


mod args;
mod logging;


use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

use dankcap::{CaptionError, Captioner};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::args::{ArgsError, Options};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("dankcli");

    /// Application version, including the Git revision it's been built from.
    static ref VERSION: String = format!("{} (rev. {})",
        option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"), REVISION.trim());
}

/// Git revision recorded by the build script.
const REVISION: &str = include_str!(concat!(env!("OUT_DIR"), "/revision"));

/// Format of the default output name, e.g. 20240101120000.
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second]");


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        if let ArgsError::Parse(ref e) = e {
            if e.kind == clap::ErrorKind::HelpDisplayed
                || e.kind == clap::ErrorKind::VersionDisplayed {
                e.exit();
            }
        }
        print_args_error(e).unwrap_or(());
        exit(exitcode::USAGE);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {}", e);
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    match caption(opts) {
        Ok(path) => println!("Meme saved successfully: {}", path.display()),
        Err(e) => {
            error!("Failed to caption the image: {}", e);
            eprintln!("Error: {}", e);
            exit(exit_code(&e));
        }
    }
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => {
            writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e)
        },
    }
}


/// Caption the image as described by `Options` and save it.
/// Returns the path of the saved file.
fn caption(opts: Options) -> Result<PathBuf, CaptionError> {
    let filename = opts.filename.unwrap_or_else(default_filename);
    debug!("Output will be saved as {}.*", filename);

    if opts.source.is_remote() {
        info!("Downloading image from {}", opts.source);
    }
    let captioner = Captioner::new(opts.source, opts.text, opts.config)?;
    info!("Captioning {}x{} image ({} frame(s))",
        captioner.dimensions().0, captioner.dimensions().1, captioner.frame_count());
    captioner.save(filename)
}

/// Name of the output file when none was given: the current local time.
fn default_filename() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| {
        debug!("Local time offset unknown, using UTC");
        OffsetDateTime::now_utc()
    });
    now.format(TIMESTAMP_FORMAT).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Exit code appropriate for given captioning error.
fn exit_code(e: &CaptionError) -> exitcode::ExitCode {
    match *e {
        CaptionError::SourceNotFound(_) => exitcode::NOINPUT,
        CaptionError::FontLoad(_) | CaptionError::Config(_) => exitcode::CONFIG,
        CaptionError::Encoding(_) => exitcode::CANTCREAT,
        _ => exitcode::UNAVAILABLE,
    }
}


#[cfg(test)]
mod tests {
    use dankcap::{CaptionError, ConfigError, EncodeError};
    use super::{default_filename, exit_code};

    #[test]
    fn default_filename_is_a_timestamp() {
        let name = default_filename();
        assert_eq!(14, name.len());
        assert!(name.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exitcode::CONFIG, exit_code(&CaptionError::Config(ConfigError::EmptyText)));
        assert_eq!(exitcode::CANTCREAT, exit_code(&CaptionError::Encoding(EncodeError::NoFrames)));
        assert_eq!(exitcode::UNAVAILABLE, exit_code(&CaptionError::Closed));
    }
}
