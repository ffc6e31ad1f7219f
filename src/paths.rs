use crate::errors::{GityupError, Result};
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the given home directory.
///
/// Only `~` on its own or a `~/` prefix is expanded. Without a known home
/// directory the path is returned untouched.
pub fn handle_tilde(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };

    if path == "~" {
        return home.to_string_lossy().into_owned();
    }

    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest).to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}

/// Turn the root argument into an absolute path.
pub fn resolve_root(arg: &str, home: Option<&Path>) -> Result<PathBuf> {
    let expanded = handle_tilde(arg, home);

    let absolute = std::path::absolute(&expanded).map_err(|source| GityupError::ResolvePath {
        path: expanded.clone(),
        source,
    })?;

    log::debug!("Resolved root {} to {}", arg, absolute.display());
    Ok(absolute)
}
