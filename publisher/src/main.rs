//! Varidor publisher CLI entrypoint.
//!
//! Copies the WebAssembly build into the web root and shrinks the published
//! copy. Nothing is printed on success at the default verbosity.

use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;
use varidor_publish::cli::Cli;
use varidor_publish::config::PublishConfig;
use varidor_publish::error::{PublishError, Result};
use varidor_publish::executor::{CommandExecutor, SystemCommandExecutor};
use varidor_publish::logging;
use varidor_publish::output::{print_dry_run_info, write_stderr_line};
use varidor_publish::pipeline::run_pipeline;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity, cli.quiet);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemCommandExecutor, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let search_dir = current_dir()?;
    let config = PublishConfig::load(cli.config.as_deref(), &search_dir, &cli.overrides())?;

    if cli.dry_run {
        print_dry_run_info(&config, stderr);
        return Ok(());
    }

    let report = run_pipeline(&config, executor)?;
    log::info!(
        "published {} ({} bytes); reduced copy at {}",
        report.copy.destination,
        report.copy.bytes_copied,
        report.post_process.output
    );
    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| PublishError::InvalidConfig {
        reason: format!("cannot determine current directory: {e}"),
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PublishError::InvalidConfig {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use varidor_publish::test_utils::StubExecutor;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = PublishError::ProcessInvocation {
            tool: "wasm-gc".to_owned(),
            reason: io::Error::from(io::ErrorKind::NotFound),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.starts_with("error: post-process step failed"));
        assert!(stderr_text.contains("wasm-gc"));
    }

    #[test]
    fn dry_run_prints_plan_without_spawning() {
        let cli = Cli::parse_from([
            "varidor-publish",
            "--dry-run",
            "--source",
            "definitely/missing.wasm",
        ]);
        let executor = StubExecutor::default();
        let mut stderr = Vec::new();

        run(&cli, &executor, &mut stderr).expect("expected dry run to succeed");

        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.contains("definitely/missing.wasm -> html/varidor.wasm"));
        assert!(executor.calls().is_empty());
    }
}
