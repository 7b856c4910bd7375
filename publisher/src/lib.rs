//! Varidor publisher library.
//!
//! Publishes the prebuilt WebAssembly build of the game: the release artefact
//! is copied into the web root and an external size-reduction tool
//! (`wasm-gc` by default) is run on the published copy. The
//! `varidor-publish` binary is a thin wrapper around [`pipeline`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered configuration from defaults, `publish.toml` and flags
//! - [`copier`] - Byte-for-byte artefact copy
//! - [`error`] - Error types naming the failing step
//! - [`executor`] - Process spawning seam
//! - [`logging`] - Logger initialisation
//! - [`output`] - Stderr output helpers
//! - [`paths`] - Artefact locations and their defaults
//! - [`pipeline`] - Copy-then-post-process orchestration
//! - [`postprocess`] - External tool invocation and exit policy

pub mod cli;
pub mod config;
pub mod copier;
pub mod error;
pub mod executor;
pub mod logging;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod postprocess;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
