//! Logger initialisation for the CLI.
//!
//! The library only talks to the `log` facade; the binary installs an
//! `env_logger` backend whose level follows `-v`/`-q`. A `RUST_LOG` value, if
//! set, is applied on top.

use log::LevelFilter;

/// Map CLI verbosity flags to a log level.
///
/// Quiet mode shows errors only; the default shows warnings so a tolerated
/// tool failure is still visible.
#[must_use]
pub const fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger.
///
/// Calling this more than once keeps the first logger.
pub fn init(verbosity: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(verbosity, quiet))
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();

    if builder.try_init().is_err() {
        // A logger is already installed (tests); keep it.
    }
}
