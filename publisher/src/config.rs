//! Layered configuration for a publish run.
//!
//! Values are resolved field by field from three layers, later layers
//! winning: built-in defaults, an optional `publish.toml`, and CLI flags.

use crate::error::{PublishError, Result};
use crate::paths::{
    ArtefactPaths, DEFAULT_DESTINATION, DEFAULT_OUTPUT_SUFFIX, DEFAULT_SOURCE, derive_output_path,
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fmt;
use std::fs;

/// Name of the configuration file discovered in the working directory.
pub const CONFIG_FILE_NAME: &str = "publish.toml";

/// Default post-processing tool.
pub const DEFAULT_TOOL: &str = "wasm-gc";

/// How a non-zero exit of the post-processing tool is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Log a warning and carry on.
    #[default]
    Lenient,
    /// Fail the run with [`PublishError::ProcessExitFailure`].
    Strict,
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Fully resolved settings for one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Files involved in the run.
    pub paths: ArtefactPaths,
    /// Post-processing executable, resolved through `PATH` when not a path.
    pub tool: String,
    /// Treatment of a failing post-processor.
    pub exit_policy: ExitPolicy,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            paths: ArtefactPaths::default(),
            tool: DEFAULT_TOOL.to_owned(),
            exit_policy: ExitPolicy::default(),
        }
    }
}

/// Values supplied on the command line; `None` defers to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Source artefact.
    pub source: Option<Utf8PathBuf>,
    /// Destination artefact.
    pub destination: Option<Utf8PathBuf>,
    /// Post-processed output.
    pub output: Option<Utf8PathBuf>,
    /// Post-processing tool.
    pub tool: Option<String>,
    /// Force [`ExitPolicy::Strict`].
    pub strict: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    artefact: ArtefactSection,
    post_process: PostProcessSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ArtefactSection {
    source: Option<Utf8PathBuf>,
    destination: Option<Utf8PathBuf>,
    output: Option<Utf8PathBuf>,
    output_suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PostProcessSection {
    tool: Option<String>,
    exit_policy: Option<ExitPolicy>,
}

impl PublishConfig {
    /// Load the configuration for a run.
    ///
    /// When `explicit` is given that file must exist. Otherwise
    /// [`CONFIG_FILE_NAME`] is looked up in `search_dir` and used if present.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ConfigRead`] if the file cannot be read,
    /// [`PublishError::ConfigParse`] if it is not valid, and
    /// [`PublishError::InvalidConfig`] if the resolved values are unusable.
    pub fn load(
        explicit: Option<&Utf8Path>,
        search_dir: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let file = match explicit {
            Some(path) => read_config_file(path)?,
            None => {
                let candidate = search_dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    read_config_file(&candidate)?
                } else {
                    log::debug!("no {CONFIG_FILE_NAME} in {search_dir}; using defaults");
                    FileConfig::default()
                }
            }
        };

        resolve(file, overrides)
    }

    /// Resolve a configuration from TOML text and overrides.
    ///
    /// `origin` only labels parse errors.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ConfigParse`] for invalid TOML or unknown keys
    /// and [`PublishError::InvalidConfig`] for unusable values.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use varidor_publish::config::{ConfigOverrides, ExitPolicy, PublishConfig};
    ///
    /// let config = PublishConfig::from_toml(
    ///     "[post_process]\nexit_policy = \"strict\"\n",
    ///     Utf8Path::new("publish.toml"),
    ///     &ConfigOverrides::default(),
    /// )?;
    /// assert_eq!(config.exit_policy, ExitPolicy::Strict);
    /// assert_eq!(config.tool, "wasm-gc");
    /// # Ok::<(), varidor_publish::error::PublishError>(())
    /// ```
    pub fn from_toml(
        contents: &str,
        origin: &Utf8Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        resolve(parse_config(contents, origin)?, overrides)
    }
}

fn read_config_file(path: &Utf8Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path).map_err(|source| PublishError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("loaded configuration from {path}");
    parse_config(&contents, path)
}

fn parse_config(contents: &str, origin: &Utf8Path) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| PublishError::ConfigParse {
        path: origin.to_owned(),
        reason: format!("TOML parse error: {e}"),
    })
}

fn resolve(file: FileConfig, overrides: &ConfigOverrides) -> Result<PublishConfig> {
    let FileConfig {
        artefact,
        post_process,
    } = file;

    let source = overrides
        .source
        .clone()
        .or(artefact.source)
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SOURCE));
    let destination = overrides
        .destination
        .clone()
        .or(artefact.destination)
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DESTINATION));
    let output = match overrides.output.clone().or(artefact.output) {
        Some(output) => output,
        None => {
            let suffix = artefact
                .output_suffix
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_SUFFIX);
            derive_output_path(&destination, suffix)?
        }
    };

    let tool = overrides
        .tool
        .clone()
        .or(post_process.tool)
        .unwrap_or_else(|| DEFAULT_TOOL.to_owned());
    if tool.trim().is_empty() {
        return Err(PublishError::InvalidConfig {
            reason: "post-processing tool must not be empty".to_owned(),
        });
    }

    let exit_policy = if overrides.strict {
        ExitPolicy::Strict
    } else {
        post_process.exit_policy.unwrap_or_default()
    };

    Ok(PublishConfig {
        paths: ArtefactPaths {
            source,
            destination,
            output,
        },
        tool,
        exit_policy,
    })
}
