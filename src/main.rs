use anyhow::Result;
use blockuino_core::cli::Args;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    blockuino_core::run_cli(&args)
}
