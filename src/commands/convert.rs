use crate::output::json::{print_json, write_json};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use har2postman::options::registry;
use har2postman::{convert, Input, OptionMap};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// HAR converted by `--test`
const SAMPLE_HAR: &str = include_str!("../../tests/fixtures/one_post_json.har");

#[derive(Debug, Args)]
pub struct ConvertCmd {
    /// HAR file to convert
    #[arg(short, long, required_unless_present = "test")]
    pub spec: Option<PathBuf>,

    /// Write the collection to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print the collection
    #[arg(short, long)]
    pub pretty: bool,

    /// JSON file with conversion options
    #[arg(short = 'c', long)]
    pub options_config: Option<PathBuf>,

    /// Inline options, e.g. includeCookies=true,folderStrategy=None
    #[arg(short = 'O', long)]
    pub options: Option<String>,

    /// Convert a bundled sample HAR
    #[arg(short, long)]
    pub test: bool,
}

impl ConvertCmd {
    pub fn run(&self, color: bool) -> Result<()> {
        let options = self.option_map()?;
        let input = match (&self.spec, self.test) {
            (_, true) => Input::String(SAMPLE_HAR.to_string()),
            (Some(spec), false) => Input::File(spec.clone()),
            (None, false) => anyhow::bail!("No HAR file given, use --spec or --test"),
        };

        let result = convert(&input, &options)?;
        let Some(collection) = result.collection() else {
            let reason = result.reason.as_deref().unwrap_or("");
            if color {
                println!("{}", reason.red());
            } else {
                println!("{}", reason);
            }
            return Ok(());
        };

        match &self.output {
            Some(path) => {
                write_json(collection, self.pretty, path)?;
                let message = format!("Conversion successful, collection written to {}", path.display());
                if color {
                    println!("{}", message.green());
                } else {
                    println!("{}", message);
                }
                Ok(())
            }
            None => print_json(collection, self.pretty),
        }
    }

    /// Options from `--options`, or else from `--options-config`
    fn option_map(&self) -> Result<OptionMap> {
        if let Some(inline) = &self.options {
            return Ok(parse_inline_options(inline));
        }
        let Some(path) = &self.options_config else {
            return Ok(OptionMap::new());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Options file {} is not a JSON object", path.display()))
    }
}

/// Parse `key=value` pairs separated by commas.
///
/// Values are read as JSON literals when possible (`true`, `3`) and as
/// plain strings otherwise. Unknown option ids are skipped.
pub fn parse_inline_options(text: &str) -> OptionMap {
    let mut options = OptionMap::new();

    for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            tracing::warn!("Ignoring option '{}' without a value", pair);
            continue;
        };
        let key = key.trim();
        if !registry().iter().any(|o| o.id == key) {
            tracing::warn!("Ignoring unknown option '{}'", key);
            continue;
        }

        let value = value.trim();
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        options.insert(key.to_string(), value);
    }

    options
}
