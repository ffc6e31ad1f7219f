use crate::errors::{GityupError, Result};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Look up an executable the way a shell would.
///
/// Names containing a path separator are checked as-is, everything else is
/// searched for in each directory of `search_path` (a `PATH`-style list).
pub fn check_exec_exists(executable: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    let executable = executable.trim();
    if executable.is_empty() {
        return Err(GityupError::EmptyExecutable);
    }

    let cwd = std::env::current_dir()?;
    let path = which::which_in(executable, search_path, cwd).map_err(|e| {
        log::debug!("Lookup of {} failed: {}", executable, e);
        GityupError::ExecutableNotFound(executable.to_string())
    })?;

    log::debug!("Found {} at {}", executable, path.display());
    Ok(path)
}
