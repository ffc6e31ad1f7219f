use clap::Parser;
use commands::update::Update;

mod commands;
mod core;
mod errors;
mod git;
mod paths;
mod preflight;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "gityup", version)]
#[command(about = "Update a folder of git repositories", long_about = None)]
struct Cli {
    #[command(flatten)]
    update: Update,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    if let Err(e) = args.update.execute() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
