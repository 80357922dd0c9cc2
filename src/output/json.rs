use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", to_json(value, pretty)?);
    Ok(())
}

/// Write a value as JSON to `path`
pub fn write_json<T: Serialize>(value: &T, pretty: bool, path: &Path) -> Result<()> {
    let output = to_json(value, pretty)?;
    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))
}
