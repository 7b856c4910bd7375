//! Error types for the Varidor publisher.
//!
//! Every variant names the pipeline step that failed so the message printed
//! by the CLI is enough to tell a copy problem from a post-processing one.

use camino::Utf8PathBuf;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while publishing an artefact.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Copying the source artefact to the destination failed.
    #[error("copy step failed: {source_path} -> {destination}: {reason}")]
    CopyFailed {
        /// Path of the artefact being copied.
        source_path: Utf8PathBuf,
        /// Path the artefact was being copied to.
        destination: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        reason: io::Error,
    },

    /// The post-processing tool could not be started.
    #[error("post-process step failed: could not run {tool}: {reason}{}", missing_tool_hint(.reason))]
    ProcessInvocation {
        /// Name or path of the tool.
        tool: String,
        /// Underlying spawn error.
        #[source]
        reason: io::Error,
    },

    /// The post-processing tool exited unsuccessfully under the strict policy.
    #[error("post-process step failed: {tool} {}", describe_status(.status))]
    ProcessExitFailure {
        /// Name or path of the tool.
        tool: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
    },

    /// An explicitly requested configuration file could not be read.
    #[error("failed to read configuration file {path}")]
    ConfigRead {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid.
    #[error("invalid configuration file {path}: {reason}")]
    ConfigParse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The resolved configuration cannot be used.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;

/// Render an exit status as "exited with status N" or "was terminated by a signal".
#[must_use]
pub fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_owned(),
    }
}

fn missing_tool_hint(reason: &io::Error) -> &'static str {
    if reason.kind() == io::ErrorKind::NotFound {
        "; install it or pass --tool with the path to a replacement"
    } else {
        ""
    }
}
