//! Invocation of the external size-reduction tool.
//!
//! The tool is opaque: it receives the published artefact and the output
//! path as its only two arguments and inherits the standard streams. What
//! happens when it exits unsuccessfully depends on the [`ExitPolicy`].

use crate::config::ExitPolicy;
use crate::error::{PublishError, Result, describe_status};
use crate::executor::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::ExitStatus;

/// Runs the post-processing tool with a fixed exit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessor {
    tool: String,
    policy: ExitPolicy,
}

/// Result of a post-processing run that did not abort the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessOutcome {
    /// Tool that was run.
    pub tool: String,
    /// Path the tool was asked to write.
    pub output: Utf8PathBuf,
    /// Exit status of the tool.
    pub status: ExitStatus,
}

impl PostProcessOutcome {
    /// Returns `true` if the tool exited with status zero.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status.success()
    }
}

impl PostProcessor {
    /// Create a post-processor for `tool`.
    #[must_use]
    pub fn new(tool: impl Into<String>, policy: ExitPolicy) -> Self {
        Self {
            tool: tool.into(),
            policy,
        }
    }

    /// Name or path of the tool.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Exit policy applied to the tool's status.
    #[must_use]
    pub const fn policy(&self) -> ExitPolicy {
        self.policy
    }

    /// Run the tool as `<tool> <input> <output>` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ProcessInvocation`] if the tool cannot be
    /// started. Under [`ExitPolicy::Strict`] a non-zero exit returns
    /// [`PublishError::ProcessExitFailure`]; under [`ExitPolicy::Lenient`] it
    /// is logged and reported in the outcome.
    pub fn invoke(
        &self,
        executor: &dyn CommandExecutor,
        input: &Utf8Path,
        output: &Utf8Path,
    ) -> Result<PostProcessOutcome> {
        let args = [input.to_string(), output.to_string()];
        let status = executor
            .status(&self.tool, &args)
            .map_err(|reason| PublishError::ProcessInvocation {
                tool: self.tool.clone(),
                reason,
            })?;

        if !status.success() {
            match self.policy {
                ExitPolicy::Strict => {
                    return Err(PublishError::ProcessExitFailure {
                        tool: self.tool.clone(),
                        status,
                    });
                }
                ExitPolicy::Lenient => log::warn!(
                    "{} {}; continuing because the exit policy is lenient",
                    self.tool,
                    describe_status(&status)
                ),
            }
        }

        Ok(PostProcessOutcome {
            tool: self.tool.clone(),
            output: output.to_owned(),
            status,
        })
    }
}
