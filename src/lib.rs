pub mod block;
pub mod cli;
pub mod error;
pub mod generator;
pub mod lists;
pub mod loader;
pub mod order;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn run_cli(args: &cli::Args) -> Result<()> {
    let sketch = compile_file(&args.input)?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &sketch)
                .with_context(|| format!("Failed to write '{}'.", path.display()))?;
        }
        None => print!("{}", sketch),
    }
    Ok(())
}

pub fn compile_file(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'.", path.display()))?;
    compile_source(&source)
}

pub fn compile_source(source: &str) -> Result<String> {
    loader::compile_program(source)
}
