//! Printing responses and reading request bodies.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Pretty-print a response body to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a `--data` argument into a typed request body.
pub fn parse_body<T: DeserializeOwned>(data: &str) -> Result<T> {
    serde_json::from_str(data).context("Invalid --data JSON for this command")
}

pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
