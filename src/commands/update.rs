use crate::{
    core::Updater,
    errors::Result,
    git::{GitCliImpl, Streaming},
    paths::resolve_root,
    preflight::check_exec_exists,
};
use clap::Args;

/// Companion helper behind `git smart-pull`
const SMART_PULL: &str = "git-smart-pull";

#[derive(Debug, Args)]
pub struct Update {
    /// Directory holding the git repositories to update
    #[arg(value_name = "ROOT_DIR")]
    pub root_dir: String,
}

impl Update {
    pub fn execute(&self) -> Result<()> {
        let home = dirs::home_dir();
        let root = resolve_root(&self.root_dir, home.as_deref())?;

        let search_path = std::env::var_os("PATH");
        let git = check_exec_exists("git", search_path.as_deref())?;
        check_exec_exists(SMART_PULL, search_path.as_deref())?;

        let updater = Updater::new(GitCliImpl::new(git, Streaming::Inherit));
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let report = updater.update_projects(&root, &mut out)?;

        for (path, outcome) in &report.outcomes {
            log::debug!("{}: {}", path.display(), outcome);
        }

        if !report.warnings().is_empty() {
            log::warn!(
                "{} problem(s) while updating {}",
                report.warnings().len(),
                root.display()
            );
        }

        Ok(())
    }
}
