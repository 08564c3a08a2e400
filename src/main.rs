use anyhow::Result;
use clap::Parser;
use repotally::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
