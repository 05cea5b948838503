use anyhow::Result;
use clap::Parser;
use loclens::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
