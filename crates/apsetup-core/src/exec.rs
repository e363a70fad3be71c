//! Subprocess execution helpers
//!
//! Two flavors: `run_checked` captures output and folds a non-zero exit
//! into a typed error; `run_live` inherits the terminal so long-running
//! tools (the installer, git clone, autopkg run) stream their own output
//! and can prompt the operator for credentials.

use crate::error::{Error, Result};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Run a command, capture its output, and fail on a non-zero exit
pub async fn run_checked(program: &str, args: &[&str]) -> Result<Output> {
    debug!("Running: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| map_spawn_error(program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::command_failed(
            display_name(program, args),
            format!("{}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(output)
}

/// Run a command with inherited stdio and fail on a non-zero exit
///
/// stdin stays attached so elevation prompts reach the operator.
pub async fn run_live(program: &str, args: &[&str]) -> Result<()> {
    debug!("Running (live): {} {}", program, args.join(" "));

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| map_spawn_error(program, e))?;

    if !status.success() {
        return Err(Error::command_failed(
            display_name(program, args),
            status.to_string(),
        ));
    }

    Ok(())
}

fn display_name(program: &str, args: &[&str]) -> String {
    match args.first() {
        Some(first) => format!("{} {}", program, first),
        None => program.to_string(),
    }
}

fn map_spawn_error(program: &str, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::command_not_found(program)
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_checked_success() {
        let output = run_checked("true", &[]).await.unwrap();
        assert!(output.status.success());
    }

    #[tokio::test]
    async fn test_run_checked_failure() {
        let err = run_checked("false", &[]).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_run_checked_missing_command() {
        let err = run_checked("definitely-not-a-real-command-9f2c", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandNotFound { .. }));
    }

    #[tokio::test]
    async fn test_run_live_success() {
        run_live("true", &[]).await.unwrap();
    }
}
