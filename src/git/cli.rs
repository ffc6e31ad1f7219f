use crate::errors::{GityupError, Result};
use crate::git::Streaming;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Marker `git status` prints when the working tree has no pending changes.
pub const CLEAN_MARKER: &str = "nothing to commit";

pub trait GitCli {
    fn is_clean(&self, dir: &Path) -> Result<bool>;
    /// Empty when HEAD is detached
    fn current_branch(&self, dir: &Path) -> Result<String>;
    fn branch_remote(&self, dir: &Path, branch: &str) -> Result<Option<String>>;
    fn smart_pull(&self, dir: &Path, out: &mut dyn Write) -> Result<bool>;
    fn remote_update(&self, dir: &Path, remote: &str, out: &mut dyn Write) -> Result<bool>;
}

pub fn contains_clean_marker(status_output: &str) -> bool {
    status_output.contains(CLEAN_MARKER)
}

pub struct GitCliImpl {
    git: PathBuf,
    streaming: Streaming,
}

impl GitCliImpl {
    pub fn new(git: PathBuf, streaming: Streaming) -> Self {
        Self { git, streaming }
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Command {
        log::debug!("Running git {} in {}", args.join(" "), dir.display());

        let mut command = Command::new(&self.git);
        command.args(args).current_dir(dir);
        command
    }

    fn run_command(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        self.command(dir, args)
            // Keep the text we inspect untranslated
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                GityupError::Git(format!("Failed to execute git {}: {}", args.join(" "), e))
            })
    }

    fn run_checked(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        let output = self.run_command(dir, args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GityupError::Git(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }

    /// Run a command whose output the user should see while it runs.
    fn run_streamed(&self, dir: &Path, args: &[&str], out: &mut dyn Write) -> Result<bool> {
        let mut command = self.command(dir, args);
        let spawn_error = |e: std::io::Error| {
            GityupError::Git(format!("Failed to execute git {}: {}", args.join(" "), e))
        };

        let status = match self.streaming {
            Streaming::Inherit => {
                // Our own progress lines must land before the child's
                out.flush()?;
                command.status().map_err(spawn_error)?
            }
            Streaming::Pipe => {
                let mut child = command
                    .stdout(Stdio::piped())
                    .spawn()
                    .map_err(spawn_error)?;
                let copied = match child.stdout.take() {
                    Some(mut stdout) => std::io::copy(&mut stdout, out).map(|_| ()),
                    None => Ok(()),
                };
                // Reap the child even when forwarding its output failed
                let status = child.wait()?;
                copied?;
                status
            }
        };

        log::debug!(
            "git {} in {} finished with {}",
            args.join(" "),
            dir.display(),
            status
        );
        Ok(status.success())
    }
}

impl GitCli for GitCliImpl {
    fn is_clean(&self, dir: &Path) -> Result<bool> {
        let output = self.run_checked(dir, &["status"])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(contains_clean_marker(&stdout))
    }

    fn current_branch(&self, dir: &Path) -> Result<String> {
        let output = self.run_checked(dir, &["branch", "--show-current"])?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn branch_remote(&self, dir: &Path, branch: &str) -> Result<Option<String>> {
        let key = format!("branch.{}.remote", branch);
        let output = self.run_command(dir, &["config", &key])?;

        match output.status.code() {
            Some(0) => {
                let remote = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok((!remote.is_empty()).then_some(remote))
            }
            // git config exits 1 when the key is not set
            Some(1) => Ok(None),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(GityupError::Git(format!(
                    "git config {} exited with {}: {}",
                    key,
                    output.status,
                    stderr.trim()
                )))
            }
        }
    }

    fn smart_pull(&self, dir: &Path, out: &mut dyn Write) -> Result<bool> {
        self.run_streamed(dir, &["smart-pull"], out)
    }

    fn remote_update(&self, dir: &Path, remote: &str, out: &mut dyn Write) -> Result<bool> {
        self.run_streamed(dir, &["remote", "update", remote, "--prune"], out)
    }
}

#[cfg(test)]
pub use mock::MockGitCli;
