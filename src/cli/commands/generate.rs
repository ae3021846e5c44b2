//! Generate Command
//!
//! Run one of the built-in reference doc generators.

use crate::cli::ui::Output;
use crate::config::Config;
use crate::generators::Generator;
use crate::types::Result;

pub fn run(config: &Config, generator: Generator, output: &Output) -> Result<()> {
    let path = generator.run(config)?;
    let display = path
        .strip_prefix(config.root())
        .unwrap_or(&path)
        .to_string_lossy()
        .to_string();
    output.success(&format!("Generated {} ({})", display, generator));
    Ok(())
}
