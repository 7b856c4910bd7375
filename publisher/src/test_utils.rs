//! Shared test utilities for the publisher crate.

use crate::executor::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::process::ExitStatus;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
#[expect(clippy::cast_sign_loss, reason = "test exit codes are non-negative")]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates an `ExitStatus` for a process killed by `signal`.
#[cfg(unix)]
#[must_use]
pub fn signal_status(signal: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(signal)
}

/// A command invocation observed by [`StubExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The program that was requested.
    pub program: String,
    /// The arguments passed to the program.
    pub args: Vec<String>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Replays scripted results in order and records every invocation so tests
/// can assert on argument order or on the absence of any call.
#[derive(Debug, Default)]
pub struct StubExecutor {
    responses: RefCell<VecDeque<io::Result<ExitStatus>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubExecutor {
    /// Creates a stub that replays `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<io::Result<ExitStatus>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Creates a stub whose single invocation exits with `code`.
    #[must_use]
    pub fn exiting_with(code: i32) -> Self {
        Self::new(vec![Ok(exit_status(code))])
    }

    /// Creates a stub whose single invocation fails to spawn with `kind`.
    #[must_use]
    pub fn failing_to_spawn(kind: io::ErrorKind) -> Self {
        Self::new(vec![Err(io::Error::from(kind))])
    }

    /// Returns the invocations observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Asserts that all scripted responses have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining responses that were not requested.
    pub fn assert_finished(&self) {
        assert!(
            self.responses.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn status(&self, program: &str, args: &[String]) -> io::Result<ExitStatus> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_owned(),
            args: args.to_vec(),
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::other("unexpected command invocation")))
    }
}
