//! Error taxonomy for the bootstrap sequence.
//!
//! Every failure is a [`ToolFailure`] wrapped in the [`BootstrapError`] variant
//! naming the step that failed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit status for any bootstrap failure.
pub const EXIT_FAILURE: u8 = 1;

/// Why an external tool did not succeed.
#[derive(Debug, Error)]
pub enum ToolFailure {
    #[error("'{program}' not found")]
    NotFound { program: String },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {}{}", describe_code(*code), describe_output(stdout, stderr))]
    Exit {
        program: String,
        /// None when the child was terminated by a signal.
        code: Option<i32>,
        /// Full captured output; the message carries only its last line.
        stdout: String,
        stderr: String,
    },
}

impl ToolFailure {
    /// Exit code of the tool, when it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolFailure::Exit { code, .. } => *code,
            _ => None,
        }
    }

    /// Captured (stdout, stderr), when the tool ran.
    pub fn output(&self) -> Option<(&str, &str)> {
        match self {
            ToolFailure::Exit { stdout, stderr, .. } => Some((stdout, stderr)),
            _ => None,
        }
    }
}

/// A failed bootstrap step.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to create virtual environment at {}: {failure}", path.display())]
    EnvironmentCreationFailed { path: PathBuf, failure: ToolFailure },

    #[error("failed to install {package}: {failure}")]
    PackageInstallFailed { package: String, failure: ToolFailure },

    #[error("failed to install git hooks: {failure}")]
    HookInstallFailed { failure: ToolFailure },
}

impl BootstrapError {
    pub fn failure(&self) -> &ToolFailure {
        match self {
            BootstrapError::EnvironmentCreationFailed { failure, .. }
            | BootstrapError::PackageInstallFailed { failure, .. }
            | BootstrapError::HookInstallFailed { failure } => failure,
        }
    }

    pub fn tool_exit_code(&self) -> Option<i32> {
        self.failure().exit_code()
    }

    /// Process exit status to terminate with. Uniform across variants.
    pub fn exit_status(&self) -> u8 {
        EXIT_FAILURE
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// `: <last line>` of stderr, or of stdout when stderr is blank. Keeps the
/// message on a single line.
fn describe_output(stdout: &str, stderr: &str) -> String {
    match last_line(stderr).or_else(|| last_line(stdout)) {
        Some(line) => format!(": {}", line),
        None => String::new(),
    }
}

/// Last non-blank line of `s`, trimmed.
pub(crate) fn last_line(s: &str) -> Option<&str> {
    s.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_failure(code: Option<i32>, stdout: &str, stderr: &str) -> ToolFailure {
        ToolFailure::Exit {
            program: "pip".to_string(),
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_exit_message_is_single_line_from_stderr() {
        let msg = exit_failure(
            Some(1),
            "collecting...",
            "Error: line one\nline two\n\n",
        )
        .to_string();
        assert_eq!(msg, "'pip' exited with exit code 1: line two");
        assert_eq!(msg.lines().count(), 1);
    }

    #[test]
    fn test_exit_message_falls_back_to_stdout() {
        let msg = exit_failure(Some(1), "first\nsome output\n", "  \n").to_string();
        assert_eq!(msg, "'pip' exited with exit code 1: some output");
    }

    #[test]
    fn test_exit_message_signal_without_output() {
        let msg = exit_failure(None, "", "").to_string();
        assert_eq!(msg, "'pip' exited with no exit code (terminated by signal)");
    }

    #[test]
    fn test_full_output_kept_in_fields() {
        let failure = exit_failure(Some(2), "out", "a\nb\nc");
        assert_eq!(failure.output(), Some(("out", "a\nb\nc")));
        assert_eq!(failure.exit_code(), Some(2));
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line("a\n  b  \n\n"), Some("b"));
        assert_eq!(last_line(" \n"), None);
    }

    #[test]
    fn test_bootstrap_error_accessors() {
        let err = BootstrapError::PackageInstallFailed {
            package: "pre-commit".to_string(),
            failure: exit_failure(Some(3), "", "boom"),
        };
        assert_eq!(err.tool_exit_code(), Some(3));
        assert_eq!(err.failure().output(), Some(("", "boom")));
        assert_eq!(err.exit_status(), EXIT_FAILURE);
        assert_eq!(
            err.to_string(),
            "failed to install pre-commit: 'pip' exited with exit code 3: boom"
        );

        let err = BootstrapError::HookInstallFailed {
            failure: ToolFailure::NotFound {
                program: "pre-commit".to_string(),
            },
        };
        assert_eq!(err.tool_exit_code(), None);
        assert_eq!(err.to_string(), "failed to install git hooks: 'pre-commit' not found");
    }
}
