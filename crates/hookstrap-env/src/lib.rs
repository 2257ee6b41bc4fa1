//! Project-local pre-commit bootstrap.
//!
//! [`builder::Bootstrapper`] ensures `<project>/.venv` exists, installs the
//! `pre-commit` package into it and registers its git hooks. External tools are
//! reached through [`runner::ToolRunner`] and progress lines through
//! [`report::Reporter`], so the whole sequence can run against fakes in tests.

pub mod builder;
pub mod error;
pub mod interpreter;
pub mod layout;
pub mod report;
pub mod runner;

pub use builder::{BootstrapReport, Bootstrapper};
pub use error::{BootstrapError, ToolFailure, EXIT_FAILURE};
