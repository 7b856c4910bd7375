//! Artefact locations and their defaults.
//!
//! The defaults reproduce the layout of the Varidor web build: the release
//! wasm from cargo's target directory is published into `html/` and the
//! size-reduced copy sits next to it with a `-gc` suffix.

use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Default location of the release build of the game.
pub const DEFAULT_SOURCE: &str = "target/wasm32-unknown-unknown/release/varidor.wasm";

/// Default location of the published artefact.
pub const DEFAULT_DESTINATION: &str = "html/varidor.wasm";

/// Suffix appended to the destination stem to name the post-processed copy.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-gc";

/// The three files the pipeline touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactPaths {
    /// Prebuilt artefact to publish.
    pub source: Utf8PathBuf,
    /// Published copy, handed to the post-processor as its input.
    pub destination: Utf8PathBuf,
    /// Where the post-processor writes the reduced artefact.
    pub output: Utf8PathBuf,
}

impl Default for ArtefactPaths {
    fn default() -> Self {
        let destination = Utf8PathBuf::from(DEFAULT_DESTINATION);
        // The default destination always has a file name.
        let output = sibling_with_suffix(&destination, DEFAULT_OUTPUT_SUFFIX)
            .unwrap_or_else(|| destination.clone());
        Self {
            source: Utf8PathBuf::from(DEFAULT_SOURCE),
            destination,
            output,
        }
    }
}

/// Derive the post-processed output path from the destination.
///
/// The result is a sibling of `destination` named
/// `{stem}{suffix}.{extension}`, or `{file_name}{suffix}` when the
/// destination has no extension.
///
/// # Errors
///
/// Returns [`PublishError::InvalidConfig`] when `destination` has no file
/// name component (for example `/` or `html/..`).
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use varidor_publish::paths::derive_output_path;
///
/// let output = derive_output_path(Utf8Path::new("html/varidor.wasm"), "-gc")?;
/// assert_eq!(output, "html/varidor-gc.wasm");
/// # Ok::<(), varidor_publish::error::PublishError>(())
/// ```
pub fn derive_output_path(destination: &Utf8Path, suffix: &str) -> Result<Utf8PathBuf> {
    sibling_with_suffix(destination, suffix).ok_or_else(|| PublishError::InvalidConfig {
        reason: format!("destination {destination} has no file name"),
    })
}

fn sibling_with_suffix(destination: &Utf8Path, suffix: &str) -> Option<Utf8PathBuf> {
    let stem = destination.file_stem()?;
    let file_name = match destination.extension() {
        Some(extension) => format!("{stem}{suffix}.{extension}"),
        None => format!("{stem}{suffix}"),
    };
    Some(destination.with_file_name(file_name))
}
