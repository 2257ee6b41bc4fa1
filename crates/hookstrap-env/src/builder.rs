//! Create or reuse the project venv, install pre-commit into it and register its hooks.

use std::io;
use std::path::{Path, PathBuf};

use hookstrap_core::config::{BootstrapConfig, HOOK_PACKAGE};

use crate::error::{BootstrapError, ToolFailure};
use crate::interpreter;
use crate::layout::detect_layout;
use crate::report::{self, Reporter};
use crate::runner::{Invocation, ToolRunner};

/// Environment root after [`Bootstrapper::ensure_environment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEnv {
    pub root: PathBuf,
    /// False when an existing directory was reused.
    pub created: bool,
}

/// Outcome of a full [`Bootstrapper::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub env_root: PathBuf,
    pub created: bool,
}

/// Runs the bootstrap steps in order. Each step blocks on its tool; the first
/// failure aborts the remaining steps and nothing already done is rolled back.
pub struct Bootstrapper<R, P> {
    config: BootstrapConfig,
    runner: R,
    reporter: P,
}

impl<R: ToolRunner, P: Reporter> Bootstrapper<R, P> {
    pub fn new(config: BootstrapConfig, runner: R, reporter: P) -> Self {
        Self {
            config,
            runner,
            reporter,
        }
    }

    pub fn env_root(&self) -> PathBuf {
        self.config.env_root()
    }

    /// Create `<project>/.venv` unless it already exists.
    pub fn ensure_environment(&self) -> Result<PreparedEnv, BootstrapError> {
        let root = self.env_root();
        if root.exists() {
            tracing::info!(path = %root.display(), "Reusing virtual environment");
            self.reporter.status(report::REUSING_ENV);
            return Ok(PreparedEnv {
                root,
                created: false,
            });
        }

        self.reporter.status(report::CREATING_ENV);
        let creation_failed = |failure| BootstrapError::EnvironmentCreationFailed {
            path: root.clone(),
            failure,
        };
        let python =
            interpreter::resolve_python(self.config.python.as_deref()).map_err(creation_failed)?;
        let inv = Invocation::new(python, &self.config.project_dir)
            .arg("-m")
            .arg("venv")
            .arg(&root);
        self.run_tool(&inv).map_err(creation_failed)?;
        tracing::info!(path = %root.display(), "Created virtual environment");
        self.reporter.status(report::ENV_CREATED);

        Ok(PreparedEnv {
            root,
            created: true,
        })
    }

    /// Install the hook manager into the environment at `root`, then its git hooks.
    pub fn install_hook_manager(&self, root: &Path) -> Result<(), BootstrapError> {
        self.reporter.status(report::INSTALLING_PACKAGE);
        let inv = self.installer(root).arg("install").arg(HOOK_PACKAGE);
        self.run_tool(&inv)
            .map_err(|failure| BootstrapError::PackageInstallFailed {
                package: HOOK_PACKAGE.to_string(),
                failure,
            })?;
        tracing::info!(package = HOOK_PACKAGE, "Installed package");
        self.reporter.status(report::PACKAGE_INSTALLED);

        self.reporter.status(report::INSTALLING_HOOKS);
        let pre_commit = detect_layout(root).executable(root, HOOK_PACKAGE);
        let inv = Invocation::new(pre_commit, &self.config.project_dir).arg("install");
        self.run_tool(&inv)
            .map_err(|failure| BootstrapError::HookInstallFailed { failure })?;
        tracing::info!(project = %self.config.project_dir.display(), "Installed git hooks");
        self.reporter.status(report::HOOKS_INSTALLED);

        Ok(())
    }

    /// Full sequence: environment, package, hooks, completion line.
    pub fn run(&self) -> Result<BootstrapReport, BootstrapError> {
        let env = self.ensure_environment()?;
        self.install_hook_manager(&env.root)?;
        self.reporter.status(report::SETUP_COMPLETED);
        Ok(BootstrapReport {
            env_root: env.root,
            created: env.created,
        })
    }

    /// `pip`, or `python -m pip` when the environment ships no pip launcher.
    fn installer(&self, root: &Path) -> Invocation {
        let layout = detect_layout(root);
        let pip = layout.executable(root, "pip");
        let python = layout.executable(root, "python");
        if !pip.exists() && python.exists() {
            tracing::debug!(python = %python.display(), "pip launcher missing, using python -m pip");
            Invocation::new(python, &self.config.project_dir)
                .arg("-m")
                .arg("pip")
        } else {
            Invocation::new(pip, &self.config.project_dir)
        }
    }

    fn run_tool(&self, inv: &Invocation) -> Result<(), ToolFailure> {
        let program = inv.program_name();
        match self.runner.run(inv) {
            Ok(out) if out.success => Ok(()),
            Ok(out) => {
                tracing::debug!(program = %program, code = ?out.code, "Tool failed");
                Err(ToolFailure::Exit {
                    program,
                    code: out.code,
                    stdout: out.stdout,
                    stderr: out.stderr,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ToolFailure::NotFound { program }),
            Err(source) => Err(ToolFailure::Spawn { program, source }),
        }
    }
}
