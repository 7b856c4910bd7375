//! Publishing the prebuilt artefact into the deployment directory.
//!
//! The copy is byte-for-byte and replaces any existing destination file. The
//! source is validated before the destination is opened so a failed run
//! leaves a previously published artefact in place.

use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

/// Outcome of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Path the artefact was written to.
    pub destination: Utf8PathBuf,
    /// Number of bytes written.
    pub bytes_copied: u64,
}

/// Copy `source` to `destination`, overwriting the destination if present.
///
/// Missing parent directories of `destination` are created.
///
/// # Errors
///
/// Returns [`PublishError::CopyFailed`] if the source is missing or not a
/// regular file, if both paths name the same file, or if any read, write or
/// directory creation fails.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use varidor_publish::copier::copy_artefact;
///
/// let report = copy_artefact(
///     Utf8Path::new("target/wasm32-unknown-unknown/release/varidor.wasm"),
///     Utf8Path::new("html/varidor.wasm"),
/// )?;
/// println!("published {} bytes", report.bytes_copied);
/// # Ok::<(), varidor_publish::error::PublishError>(())
/// ```
pub fn copy_artefact(source: &Utf8Path, destination: &Utf8Path) -> Result<CopyReport> {
    let fail = |reason: io::Error| PublishError::CopyFailed {
        source_path: source.to_owned(),
        destination: destination.to_owned(),
        reason,
    };

    let metadata = fs::metadata(source).map_err(fail)?;
    if !metadata.is_file() {
        return Err(fail(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source is not a regular file",
        )));
    }

    if is_same_file(source, destination) {
        return Err(fail(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        )));
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    let bytes_copied = fs::copy(source, destination).map_err(fail)?;
    log::debug!("copied {bytes_copied} bytes from {source} to {destination}");

    Ok(CopyReport {
        destination: destination.to_owned(),
        bytes_copied,
    })
}

/// Opening the destination for writing truncates it, so copying a file onto
/// itself (by any path, including a hard link) would destroy the source.
#[cfg(unix)]
fn is_same_file(source: &Utf8Path, destination: &Utf8Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(source), fs::metadata(destination)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(source: &Utf8Path, destination: &Utf8Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Sandbox {
        root: Utf8PathBuf,
        _dir: TempDir,
    }

    impl Sandbox {
        fn path(&self, relative: &str) -> Utf8PathBuf {
            self.root.join(relative)
        }

        fn write(&self, relative: &str, contents: &[u8]) -> Utf8PathBuf {
            let path = self.path(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent");
            }
            fs::write(&path, contents).expect("failed to write fixture");
            path
        }
    }

    #[fixture]
    fn sandbox() -> Sandbox {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root =
            Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8");
        Sandbox { root, _dir: dir }
    }

    #[rstest]
    fn copies_every_byte_value(sandbox: Sandbox) {
        let contents: Vec<u8> = (0..=u8::MAX).cycle().take(4096 + 17).collect();
        let source = sandbox.write("target/app.wasm", &contents);
        let destination = sandbox.path("html/app.wasm");

        let report = copy_artefact(&source, &destination).expect("expected copy to succeed");

        assert_eq!(report.bytes_copied, contents.len() as u64);
        assert_eq!(report.destination, destination);
        assert_eq!(fs::read(&destination).expect("read destination"), contents);
    }

    #[rstest]
    fn copies_empty_file(sandbox: Sandbox) {
        let source = sandbox.write("empty.wasm", b"");
        let destination = sandbox.path("html/empty.wasm");

        let report = copy_artefact(&source, &destination).expect("expected copy to succeed");

        assert_eq!(report.bytes_copied, 0);
        assert!(fs::read(&destination).expect("read destination").is_empty());
    }

    #[rstest]
    fn replaces_longer_existing_destination(sandbox: Sandbox) {
        let source = sandbox.write("a.bin", &[1, 2]);
        let destination = sandbox.write("out/a.bin", &[9; 64]);

        copy_artefact(&source, &destination).expect("expected copy to succeed");

        assert_eq!(fs::read(&destination).expect("read destination"), vec![1, 2]);
    }

    #[rstest]
    fn missing_source_leaves_destination_untouched(sandbox: Sandbox) {
        let source = sandbox.path("missing.wasm");
        let destination = sandbox.write("html/varidor.wasm", b"previous");

        let err = copy_artefact(&source, &destination).expect_err("expected copy to fail");

        assert!(matches!(
            &err,
            PublishError::CopyFailed { reason, .. } if reason.kind() == io::ErrorKind::NotFound
        ));
        assert_eq!(
            fs::read(&destination).expect("read destination"),
            b"previous"
        );
    }

    #[rstest]
    fn missing_source_does_not_create_destination(sandbox: Sandbox) {
        let destination = sandbox.path("html/varidor.wasm");

        copy_artefact(&sandbox.path("missing.wasm"), &destination)
            .expect_err("expected copy to fail");

        assert!(!destination.exists());
        assert!(!sandbox.path("html").exists());
    }

    #[rstest]
    fn directory_source_is_rejected(sandbox: Sandbox) {
        let source = sandbox.path("target");
        fs::create_dir_all(&source).expect("failed to create dir");

        let err = copy_artefact(&source, &sandbox.path("html/x.wasm"))
            .expect_err("expected copy to fail");

        assert!(matches!(
            &err,
            PublishError::CopyFailed { reason, .. } if reason.kind() == io::ErrorKind::InvalidInput
        ));
    }

    #[rstest]
    fn copying_onto_itself_keeps_contents(sandbox: Sandbox) {
        let source = sandbox.write("html/varidor.wasm", b"\0asm");

        let err = copy_artefact(&source, &source).expect_err("expected copy to fail");

        assert!(matches!(err, PublishError::CopyFailed { .. }));
        assert_eq!(fs::read(&source).expect("read source"), b"\0asm");
    }

    #[cfg(unix)]
    #[rstest]
    fn copying_onto_a_hard_link_keeps_contents(sandbox: Sandbox) {
        let source = sandbox.write("a.bin", &[0xDE, 0xAD, 0xBE, 0xEF]);
        let linked = sandbox.path("b.bin");
        fs::hard_link(&source, &linked).expect("failed to create hard link");

        let err = copy_artefact(&source, &linked).expect_err("expected copy to fail");

        assert!(matches!(
            &err,
            PublishError::CopyFailed { reason, .. } if reason.kind() == io::ErrorKind::InvalidInput
        ));
        assert_eq!(
            fs::read(&source).expect("read source"),
            [0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn copying_through_a_symlink_to_the_source_is_rejected(sandbox: Sandbox) {
        let source = sandbox.write("a.bin", b"wasm");
        let linked = sandbox.path("link.bin");
        std::os::unix::fs::symlink(&source, &linked).expect("failed to create symlink");

        copy_artefact(&source, &linked).expect_err("expected copy to fail");

        assert_eq!(fs::read(&source).expect("read source"), b"wasm");
    }

    #[cfg(unix)]
    #[rstest]
    fn unwritable_destination_reports_copy_failure(sandbox: Sandbox) {
        use std::os::unix::fs::PermissionsExt;

        // Root bypasses permission bits.
        if unsafe { libc::geteuid() } == 0 {
            return;
        }

        let source = sandbox.write("a.bin", b"data");
        let locked = sandbox.path("locked");
        fs::create_dir_all(&locked).expect("failed to create dir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555))
            .expect("failed to set permissions");

        let result = copy_artefact(&source, &locked.join("a.bin"));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
            .expect("failed to restore permissions");
        assert!(matches!(result, Err(PublishError::CopyFailed { .. })));
    }
}
