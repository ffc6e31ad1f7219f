use std::fmt;

/// Where the output of long-running git commands goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Streaming {
    /// Children write straight to the terminal
    Inherit,
    /// Children's stdout is copied into the caller's writer
    Pipe,
}

/// The per-repository check that was running when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Status,
    Branch,
    Remote,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Status => "git status",
            Stage::Branch => "git branch",
            Stage::Remote => "git config",
        };
        f.write_str(name)
    }
}
