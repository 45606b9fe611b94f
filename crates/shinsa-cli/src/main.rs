//! Shinsa CLI - Command-line interface for the shinsa Python code reviewer
//!
//! Fast Python code reviewer written in Rust.

mod commands;
mod output;

use clap::Parser;
use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "shinsa",
    author,
    version,
    about = "Fast Python code reviewer",
    long_about = "Shinsa is a fast reviewer for Python source files.\n\n\
                  It flags mutable default arguments, swallowed exceptions, identity\n\
                  comparisons against literals, shadowed builtins, and functions that\n\
                  can fall off the end without returning a value."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => args.run(),
        Commands::Init(args) => args.run(),
        Commands::Explain(args) => args.run(),
    }
}
