//! CLI argument definitions for the Varidor publisher.
//!
//! Every flag is optional; running with none reproduces the original
//! copy-then-`wasm-gc` step with its built-in paths.

use crate::config::ConfigOverrides;
use camino::Utf8PathBuf;
use clap::Parser;

/// Publish the Varidor WebAssembly build.
#[derive(Parser, Debug, Default)]
#[command(name = "varidor-publish")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish the Varidor WebAssembly build.\n\n",
    "Copies the release artefact into the web root and runs a size-reduction ",
    "tool on the published copy. Paths and the tool default to the Varidor ",
    "layout and can be changed in publish.toml or with the flags below.\n\n",
    "A non-zero exit from the tool is logged and ignored unless --strict is ",
    "given.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish with the default layout:\n",
    "    $ varidor-publish\n\n",
    "  Use wasm-opt and fail if it fails:\n",
    "    $ varidor-publish --tool wasm-opt --strict\n\n",
    "  Preview without touching anything:\n",
    "    $ varidor-publish --dry-run",
))]
pub struct Cli {
    /// Configuration file [default: publish.toml if present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Prebuilt artefact to publish.
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<Utf8PathBuf>,

    /// Where to publish the artefact.
    #[arg(short, long, value_name = "PATH")]
    pub destination: Option<Utf8PathBuf>,

    /// Where the tool writes the reduced artefact [default: destination with -gc suffix].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Size-reduction executable.
    #[arg(short, long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Fail when the tool exits with a non-zero status.
    #[arg(long)]
    pub strict: bool,

    /// Show the resolved plan and exit without copying or running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Configuration values supplied on the command line.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: self.source.clone(),
            destination: self.destination.clone(),
            output: self.output.clone(),
            tool: self.tool.clone(),
            strict: self.strict,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
