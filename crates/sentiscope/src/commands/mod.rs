//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use std::io::Read;

pub mod analyze;
pub mod info;
pub mod serve;

/// Read the input text for a command: a file path, or stdin when the
/// path is `-`.
pub fn read_input(path: &Utf8Path) -> anyhow::Result<String> {
    if path.as_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}
