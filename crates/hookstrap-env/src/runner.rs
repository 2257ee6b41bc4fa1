//! ToolRunner trait: the seam between the bootstrap sequence and external tools.
//!
//! [`SystemRunner`] spawns real processes and blocks until they exit; tests swap
//! in a recording fake.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use hookstrap_core::observability;

use crate::error::last_line;

/// One external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Working directory of the child.
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program name as shown in messages and logs.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }
}

/// Result of a completed child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// None when the child was terminated by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            success: true,
            ..Default::default()
        }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Runs external commands to completion.
///
/// `Err` means the process could not be started at all; a started process that
/// exits non-zero is `Ok` with `success == false`.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        (**self).run(invocation)
    }
}

/// Spawns real processes with captured stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        let program = invocation.program_name();
        let args = invocation.args_lossy();
        let cwd = invocation.cwd.to_string_lossy();
        tracing::debug!(program = %program, args = ?args, cwd = %cwd, "Running tool");
        observability::audit_tool_started(&program, &args, &cwd);

        let start = Instant::now();
        let result = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output();
        let duration_ms = start.elapsed().as_millis() as u64;

        let out = match result {
            Ok(out) => out,
            Err(e) => {
                observability::audit_tool_completed(&program, None, duration_ms);
                return Err(e);
            }
        };
        let output = ToolOutput {
            code: out.status.code(),
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        };
        observability::audit_tool_completed(&program, output.code, duration_ms);
        tracing::debug!(
            program = %program,
            code = ?output.code,
            duration_ms,
            "Tool finished"
        );
        log_output(&program, &output);
        Ok(output)
    }
}

/// Full output at trace; the last stdout line (pip's summary, for instance) at info.
fn log_output(program: &str, output: &ToolOutput) {
    if let Some(line) = last_line(&output.stdout) {
        tracing::info!(program = %program, "{}", line);
    }
    if !output.stdout.is_empty() {
        tracing::trace!(program = %program, stdout = %output.stdout, "Tool stdout");
    }
    if !output.stderr.is_empty() {
        tracing::trace!(program = %program, stderr = %output.stderr, "Tool stderr");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_system_runner_captures_output_and_code() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("sh", dir.path())
            .arg("-c")
            .arg("pwd; echo oops >&2; exit 7");
        let out = SystemRunner.run(&inv).unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(7));
        assert_eq!(out.stderr.trim(), "oops");
        let reported = std::path::PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_system_runner_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("hookstrap-definitely-missing-tool", dir.path());
        let err = SystemRunner.run(&inv).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_system_runner_keeps_output_of_successful_tool() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("sh", dir.path())
            .arg("-c")
            .arg("echo Collecting; echo Successfully installed; echo 'a warning' >&2");
        let out = SystemRunner.run(&inv).unwrap();
        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(last_line(&out.stdout), Some("Successfully installed"));
        assert_eq!(out.stderr.trim(), "a warning");
    }
}
