//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `watchlog` binary that
//! measures execution time, enforces a timeout and provides convenient
//! assertion methods.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct WatchlogCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl WatchlogCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_watchlog")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set command timeout
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Start the process without waiting for it
    pub fn spawn(&self) -> Result<Child> {
        Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env("RUST_LOG", "info")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn watchlog")
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();
        let mut child = self.spawn()?;

        wait_with_timeout(&mut child, self.timeout)?;
        let result = collect(child)?;

        Ok(CommandResult {
            duration: start.elapsed(),
            ..result
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Wait for `child`, killing it if it outlives `timeout`
pub fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait().context("Failed to poll watchlog")? {
            return Ok(status);
        }

        if start.elapsed() > timeout {
            child.kill().ok();
            anyhow::bail!("watchlog did not exit within {:?}", timeout);
        }

        std::thread::sleep(Duration::from_millis(20));
    }
}

/// Collect output from a child that has already exited
pub fn collect(child: Child) -> Result<CommandResult> {
    let output = child
        .wait_with_output()
        .context("Failed to collect watchlog output")?;

    Ok(CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
        duration: Duration::ZERO,
    })
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// watchlog!(dir, "/tmp/f", "1").assert_success()?;
/// ```
#[macro_export]
macro_rules! watchlog {
    ($dir:expr) => {{
        $crate::common::cli::WatchlogCommand::new($dir)
    }};
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::WatchlogCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
