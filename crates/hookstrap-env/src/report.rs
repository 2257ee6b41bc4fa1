//! User-facing status lines.

pub const CREATING_ENV: &str = "Creating virtual environment...";
pub const ENV_CREATED: &str = "Virtual environment created.";
pub const REUSING_ENV: &str = "Reusing existing virtual environment.";
pub const INSTALLING_PACKAGE: &str = "Installing pre-commit...";
pub const PACKAGE_INSTALLED: &str = "Pre-commit installed.";
pub const INSTALLING_HOOKS: &str = "Installing pre-commit hooks...";
pub const HOOKS_INSTALLED: &str = "Pre-commit hooks installed.";
pub const SETUP_COMPLETED: &str = "Pre-commit setup completed successfully.";

/// Prefix of the one-line failure diagnostic.
pub const FAILURE_PREFIX: &str = "Error during pre-commit setup";

/// Sink for progress lines emitted between steps.
pub trait Reporter {
    fn status(&self, message: &str);

    /// One-line failure diagnostic, emitted through the same sink as status lines.
    /// Line breaks in `description` are folded into `"; "`.
    fn failure(&self, description: &str) {
        self.status(&failure_line(description));
    }
}

impl<P: Reporter + ?Sized> Reporter for &P {
    fn status(&self, message: &str) {
        (**self).status(message)
    }

    fn failure(&self, description: &str) {
        (**self).failure(description)
    }
}

/// Prints each status line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn status(&self, message: &str) {
        println!("{}", message);
    }
}

/// `Error during pre-commit setup: <description>` on a single line.
pub fn failure_line(description: &str) -> String {
    let folded: Vec<&str> = description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    format!("{}: {}", FAILURE_PREFIX, folded.join("; "))
}
