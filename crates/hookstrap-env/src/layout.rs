//! EnvLayout trait: where a venv keeps its executables.
//!
//! POSIX venvs use `bin/<name>`, Windows venvs use `Scripts/<name>.exe`.
//! [`detect_layout`] inspects an existing environment and falls back to the
//! host platform's convention.

use std::path::{Path, PathBuf};

/// Resolve executable paths inside an environment root.
pub trait EnvLayout: Send + Sync {
    /// Directory holding the environment's executables.
    fn bin_dir(&self, root: &Path) -> PathBuf;

    /// Path to executable `name` inside the environment.
    fn executable(&self, root: &Path, name: &str) -> PathBuf;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PosixLayout;

impl EnvLayout for PosixLayout {
    fn bin_dir(&self, root: &Path) -> PathBuf {
        root.join("bin")
    }

    fn executable(&self, root: &Path, name: &str) -> PathBuf {
        self.bin_dir(root).join(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsLayout;

impl EnvLayout for WindowsLayout {
    fn bin_dir(&self, root: &Path) -> PathBuf {
        root.join("Scripts")
    }

    fn executable(&self, root: &Path, name: &str) -> PathBuf {
        self.bin_dir(root).join(format!("{}.exe", name))
    }
}

static POSIX: PosixLayout = PosixLayout;
static WINDOWS: WindowsLayout = WindowsLayout;

/// Layout used by venvs created on this host.
pub fn host_layout() -> &'static dyn EnvLayout {
    if cfg!(windows) {
        &WINDOWS
    } else {
        &POSIX
    }
}

/// Layout of the environment at `root`: whichever executable directory exists,
/// otherwise the host convention.
pub fn detect_layout(root: &Path) -> &'static dyn EnvLayout {
    if POSIX.bin_dir(root).is_dir() {
        &POSIX
    } else if WINDOWS.bin_dir(root).is_dir() {
        &WINDOWS
    } else {
        host_layout()
    }
}
