//! Copy-then-post-process pipeline orchestration.
//!
//! The two steps run strictly in order on the calling thread. The
//! post-processor only ever sees a destination the copier has just written;
//! if the copy fails the tool is never started.

use crate::config::PublishConfig;
use crate::copier::{CopyReport, copy_artefact};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::postprocess::{PostProcessOutcome, PostProcessor};

/// Results of both steps of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Outcome of the copy step.
    pub copy: CopyReport,
    /// Outcome of the post-processing step.
    pub post_process: PostProcessOutcome,
}

/// Publish the artefact described by `config`.
///
/// # Errors
///
/// Returns the first error raised by either step; see
/// [`copy_artefact`] and [`PostProcessor::invoke`].
pub fn run_pipeline(config: &PublishConfig, executor: &dyn CommandExecutor) -> Result<PipelineReport> {
    let paths = &config.paths;

    log::info!("publishing {} to {}", paths.source, paths.destination);
    let copy = copy_artefact(&paths.source, &paths.destination)?;

    log::info!(
        "running {} {} {}",
        config.tool,
        paths.destination,
        paths.output
    );
    let processor = PostProcessor::new(config.tool.clone(), config.exit_policy);
    let post_process = processor.invoke(executor, &paths.destination, &paths.output)?;
    log::debug!("{} exited with {}", post_process.tool, post_process.status);

    Ok(PipelineReport { copy, post_process })
}

/// Render the resolved plan without performing it.
///
/// # Examples
///
/// ```
/// use varidor_publish::config::PublishConfig;
/// use varidor_publish::pipeline::describe_plan;
///
/// let plan = describe_plan(&PublishConfig::default());
/// assert!(plan.contains("wasm-gc html/varidor.wasm html/varidor-gc.wasm"));
/// ```
#[must_use]
pub fn describe_plan(config: &PublishConfig) -> String {
    let paths = &config.paths;
    format!(
        concat!(
            "Dry run - no files will be modified\n",
            "\n",
            "Copy:         {} -> {}\n",
            "Post-process: {} {} {}\n",
            "Exit policy:  {}",
        ),
        paths.source,
        paths.destination,
        config.tool,
        paths.destination,
        paths.output,
        config.exit_policy,
    )
}
