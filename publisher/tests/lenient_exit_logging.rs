//! Log output for a tolerated post-processor failure.
//!
//! Kept in its own test binary because the capturing logger is global.

use camino::Utf8PathBuf;
use log::Level;
use logtest::Logger;
use std::fs;
use tempfile::TempDir;
use varidor_publish::config::{ExitPolicy, PublishConfig};
use varidor_publish::paths::ArtefactPaths;
use varidor_publish::pipeline::run_pipeline;
use varidor_publish::test_utils::StubExecutor;

#[test]
fn lenient_failure_is_logged_as_warning() {
    let mut logger = Logger::start();
    let dir = TempDir::new().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8");
    fs::write(root.join("a.bin"), b"wasm").expect("failed to write source");
    let config = PublishConfig {
        paths: ArtefactPaths {
            source: root.join("a.bin"),
            destination: root.join("out/a.bin"),
            output: root.join("out/a-gc.bin"),
        },
        tool: "wasm-gc".to_owned(),
        exit_policy: ExitPolicy::Lenient,
    };

    run_pipeline(&config, &StubExecutor::exiting_with(3)).expect("expected lenient success");

    let mut warned = false;
    while let Some(record) = logger.pop() {
        if record.level() == Level::Warn
            && record
                .args()
                .to_string()
                .contains("wasm-gc exited with status 3")
        {
            warned = true;
            break;
        }
    }
    assert!(warned, "expected a warning about the tool's exit status");
}
