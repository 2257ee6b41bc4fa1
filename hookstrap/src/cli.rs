use std::path::PathBuf;

use clap::Parser;

/// hookstrap - create or reuse ./.venv, install pre-commit into it and register its git hooks
#[derive(Parser, Debug)]
#[command(name = "hookstrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to bootstrap (default: $HOOKSTRAP_PROJECT_DIR or the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Python interpreter used to create the venv (default: $HOOKSTRAP_PYTHON, then python3/python on PATH)
    #[arg(long, value_name = "PYTHON")]
    pub python: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["hookstrap"]).unwrap();
        assert!(cli.project_dir.is_none());
        assert!(cli.python.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "hookstrap",
            "--project-dir",
            "repo",
            "--python",
            "python3.12",
        ])
        .unwrap();
        assert_eq!(cli.project_dir, Some(PathBuf::from("repo")));
        assert_eq!(cli.python.as_deref(), Some("python3.12"));
    }

    #[test]
    fn test_rejects_positional() {
        assert!(Cli::try_parse_from(["hookstrap", "extra"]).is_err());
    }
}
