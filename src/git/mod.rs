pub mod cli;
pub mod types;


pub use cli::{GitCli, GitCliImpl};
pub use types::{Stage, Streaming};
