//! Process spawning seam for the post-processing step.
//!
//! The pipeline never calls [`std::process::Command`] directly. It goes
//! through [`CommandExecutor`] so behaviour tests can script the tool's exit
//! status without touching the host.

use std::io;
use std::process::{Command, ExitStatus};

/// Abstraction for running external commands to completion.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `program` with `args`, inheriting the standard streams, and
    /// blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised when the program cannot be located or
    /// started. A program that starts and then fails is reported through the
    /// returned [`ExitStatus`], not as an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use varidor_publish::executor::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let args = ["in.wasm".to_owned(), "out.wasm".to_owned()];
    /// let status = SystemCommandExecutor.status("wasm-gc", &args)?;
    /// assert!(status.success());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn status(&self, program: &str, args: &[String]) -> io::Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn status(&self, program: &str, args: &[String]) -> io::Result<ExitStatus> {
        log::debug!("spawning {program} {}", args.join(" "));
        Command::new(program).args(args).status()
    }
}
