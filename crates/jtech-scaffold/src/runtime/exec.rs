//! External command execution
//!
//! Two modes, matching how the tool talks to the SDK CLI:
//!
//! - **streaming**: relay child output line by line while waiting for the
//!   process; one reader task per stream so a full pipe buffer on either
//!   stream can never deadlock the child. Both readers are joined before
//!   the call returns, so no relay outlives the command.
//! - **captured**: run to completion and hand back the collected output.
//!
//! Neither mode has a timeout or retry: every invocation blocks until the
//! child exits.

use anyhow::{Context, Result};
use colored::Colorize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Collected output of a captured run.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

fn display_command(program: &OsStr, args: &[&str]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

/// Run a command in `cwd`, relaying its output as it arrives.
///
/// Lines from stdout and stderr keep their order within each stream, but
/// the two streams interleave arbitrarily. Returns `Ok(false)` on a
/// non-zero exit (already reported to the user); `Err` only when the
/// process could not be spawned or waited on.
pub async fn run_streaming(program: &Path, args: &[&str], cwd: &Path) -> Result<bool> {
    let command_line = display_command(program.as_os_str(), args);
    println!();
    println!("{} {}", "Running:".dimmed(), command_line.yellow());

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start command: {command_line}"))?;

    let stdout = child.stdout.take().context("Failed to capture stdout")?;
    let stderr = child.stderr.take().context("Failed to capture stderr")?;

    let stdout_task = tokio::spawn(relay_lines(stdout, false));
    let stderr_task = tokio::spawn(relay_lines(stderr, true));

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for command: {command_line}"))?;

    // Drain both relays before reporting, so no output trails the result.
    let _ = stdout_task.await;
    let _ = stderr_task.await;

    if status.success() {
        Ok(true)
    } else {
        eprintln!(
            "{}",
            format!(
                "Command failed with exit code {}: {command_line}",
                status.code().unwrap_or(-1)
            )
            .red()
        );
        Ok(false)
    }
}

async fn relay_lines<R: AsyncRead + Unpin>(stream: R, is_stderr: bool) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if is_stderr => eprintln!("  {}", line.yellow()),
            Ok(Some(line)) => println!("  {line}"),
            Ok(None) => break,
            Err(e) => {
                let name = if is_stderr { "stderr" } else { "stdout" };
                eprintln!("{} {}", format!("Error reading {name}:").red(), e);
                break;
            }
        }
    }
}

/// Run a command to completion, capturing its output in full.
///
/// `Err` only when the process could not be spawned; a non-zero exit is
/// reported through [`CommandOutput::success`] with the captured stderr.
pub async fn run_captured(program: &Path, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().await.with_context(|| {
        format!(
            "Failed to run command: {}",
            display_command(program.as_os_str(), args)
        )
    })?;

    Ok(CommandOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
