use crate::{
    errors::{GityupError, Result},
    git::{GitCli, Stage},
};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Pulled and refreshed the remote-tracking refs
    Updated,
    PullFailed,
    RefreshFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Dirty,
    DetachedHead,
    NoRemote,
    Synced(SyncStatus),
    Failed { stage: Stage, message: String },
}

impl fmt::Display for RepoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoOutcome::Dirty => f.write_str("skipped, local changes"),
            RepoOutcome::DetachedHead => f.write_str("skipped, detached HEAD"),
            RepoOutcome::NoRemote => f.write_str("skipped, no remote"),
            RepoOutcome::Synced(SyncStatus::Updated) => f.write_str("updated"),
            RepoOutcome::Synced(SyncStatus::PullFailed) => f.write_str("smart-pull failed"),
            RepoOutcome::Synced(SyncStatus::RefreshFailed) => {
                f.write_str("remote update failed")
            }
            RepoOutcome::Failed { stage, message } => {
                write!(f, "{} failed: {}", stage, message)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub outcomes: Vec<(PathBuf, RepoOutcome)>,
    warnings: Vec<String>,
}

impl ScanReport {
    /// Repositories a sync was attempted for
    pub fn synced(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, RepoOutcome::Synced(_)))
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Problems hit while scanning, in the order they happened
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// A working tree is a directory with a `.git` directory inside.
pub fn is_git(path: &Path) -> bool {
    path.join(".git").is_dir()
}

pub struct Updater<T: GitCli> {
    pub git: T,
}

impl<T: GitCli> Updater<T> {
    pub fn new(git: T) -> Self {
        Self { git }
    }

    /// Update every clean, tracking repository directly below `root`
    ///
    /// Only an unreadable root is an error, anything that goes wrong inside
    /// a single repository ends up in the report.
    pub fn update_projects(&self, root: &Path, out: &mut dyn Write) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        let entries = std::fs::read_dir(root).map_err(|source| GityupError::ReadRoot {
            path: root.to_path_buf(),
            source,
        })?;

        // Symlinks are not followed, only real directories count
        let mut children = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    report.warn(format!("cannot read entry in {}: {}", root.display(), e));
                    continue;
                }
            };
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => children.push(entry.path()),
                Ok(_) => {}
                Err(e) => report.warn(format!("cannot stat {}: {}", entry.path().display(), e)),
            }
        }
        children.sort();

        for path in children {
            if !is_git(&path) {
                continue;
            }

            let outcome = self.update_repo(&path, out, &mut report)?;
            report.outcomes.push((path, outcome));
        }

        log::info!(
            "Scanned {} repositories, synced {}",
            report.outcomes.len(),
            report.synced().len()
        );

        Ok(report)
    }

    fn update_repo(
        &self,
        path: &Path,
        out: &mut dyn Write,
        report: &mut ScanReport,
    ) -> Result<RepoOutcome> {
        let display = path.display();

        match self.git.is_clean(path) {
            Ok(true) => {}
            Ok(false) => {
                writeln!(out, "local changes detected, skipping {}", display)?;
                return Ok(RepoOutcome::Dirty);
            }
            Err(e) => return self.check_failed(path, Stage::Status, e, out, report),
        }

        let branch = match self.git.current_branch(path) {
            Ok(branch) => branch,
            Err(e) => return self.check_failed(path, Stage::Branch, e, out, report),
        };
        if branch.is_empty() {
            writeln!(out, "#### detached HEAD state, skipping {} ####", display)?;
            return Ok(RepoOutcome::DetachedHead);
        }

        let remote = match self.git.branch_remote(path, &branch) {
            Ok(Some(remote)) => remote,
            Ok(None) => {
                writeln!(out, "no remote to pull from, skipping {}", display)?;
                return Ok(RepoOutcome::NoRemote);
            }
            Err(e) => return self.check_failed(path, Stage::Remote, e, out, report),
        };

        writeln!(out, "#### pulling {} ####", display)?;
        log::info!("Syncing {} ({} from {})", display, branch, remote);
        let status = self.sync(path, &remote, out, report);
        writeln!(out)?;

        Ok(RepoOutcome::Synced(status))
    }

    fn check_failed(
        &self,
        path: &Path,
        stage: Stage,
        error: GityupError,
        out: &mut dyn Write,
        report: &mut ScanReport,
    ) -> Result<RepoOutcome> {
        let message = error.to_string();
        report.warn(format!("{}: {} failed: {}", path.display(), stage, message));
        writeln!(out, "{} failed, skipping {}", stage, path.display())?;
        Ok(RepoOutcome::Failed { stage, message })
    }

    /// Smart-pull, then refresh the remote-tracking refs if the pull worked
    fn sync(
        &self,
        path: &Path,
        remote: &str,
        out: &mut dyn Write,
        report: &mut ScanReport,
    ) -> SyncStatus {
        let display = path.display();

        match self.git.smart_pull(path, out) {
            Ok(true) => {}
            Ok(false) => {
                report.warn(format!("{}: git smart-pull failed", display));
                return SyncStatus::PullFailed;
            }
            Err(e) => {
                report.warn(format!("{}: {}", display, e));
                return SyncStatus::PullFailed;
            }
        }

        match self.git.remote_update(path, remote, out) {
            Ok(true) => SyncStatus::Updated,
            Ok(false) => {
                report.warn(format!(
                    "{}: git remote update {} failed",
                    display, remote
                ));
                SyncStatus::RefreshFailed
            }
            Err(e) => {
                report.warn(format!("{}: {}", display, e));
                SyncStatus::RefreshFailed
            }
        }
    }
}
