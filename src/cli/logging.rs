//! Module implementing logging for the application.
//!
//! Log records from the `log` macros (both ours and the library's)
//! are routed to a `slog` terminal drain on standard error.

use std::sync::Mutex;

use log::{self, SetLoggerError};
use slog::{self, Drain, Level, LevelFilter, Logger};
use slog_scope::{self, GlobalLoggerGuard};
use slog_stdlog;
use slog_term::{FullFormat, TermDecorator};


/// Logging level used when neither -v nor -q has been passed.
const DEFAULT_LEVEL: Level = Level::Info;


/// Initialize logging with given verbosity.
///
/// The verbosity value has the same meaning as in `args::Options::verbosity`.
/// Returned guard has to be kept alive for as long as the logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let level = level_for(verbosity);

    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = Mutex::new(drain).fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let logger = Logger::root(drain, slog::o!());

    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log_level(level))?;
    Ok(guard)
}


/// Map the -v/-q count onto a `slog::Level`.
fn level_for(verbosity: isize) -> Level {
    let index = DEFAULT_LEVEL.as_usize() as isize + verbosity;
    let index = index.max(Level::Critical.as_usize() as isize)
        .min(Level::Trace.as_usize() as isize);
    Level::from_usize(index as usize).unwrap_or(DEFAULT_LEVEL)
}

fn log_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}
