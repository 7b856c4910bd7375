//! User-facing output for the CLI.
//!
//! Progress goes through `log`; only the dry-run plan and fatal errors are
//! written directly to stderr.

use crate::config::PublishConfig;
use crate::pipeline::describe_plan;
use std::fmt::Display;
use std::io::Write;

/// Write a line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Print the resolved plan for a dry run.
pub fn print_dry_run_info(config: &PublishConfig, stderr: &mut dyn Write) {
    write_stderr_line(stderr, describe_plan(config));
}
