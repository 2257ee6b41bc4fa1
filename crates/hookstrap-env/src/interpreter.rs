//! Locate the Python interpreter used to create the venv.

use std::path::PathBuf;

use crate::error::ToolFailure;

/// Interpreter names searched on PATH when none is configured, in order.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Resolve the interpreter: the configured one (path or bare name), otherwise the
/// first of [`PYTHON_CANDIDATES`] found on PATH.
pub fn resolve_python(configured: Option<&str>) -> Result<PathBuf, ToolFailure> {
    if let Some(python) = configured {
        return which::which(python).map_err(|e| {
            tracing::debug!(python, error = %e, "Configured interpreter not found");
            ToolFailure::NotFound {
                program: python.to_string(),
            }
        });
    }
    for name in PYTHON_CANDIDATES {
        if let Ok(path) = which::which(name) {
            tracing::debug!(path = %path.display(), "Using interpreter from PATH");
            return Ok(path);
        }
    }
    Err(ToolFailure::NotFound {
        program: PYTHON_CANDIDATES.join(" or "),
    })
}
