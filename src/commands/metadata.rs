use crate::output::json::print_json;
use crate::output::OutputFormat;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use har2postman::{get_meta_data, Input};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MetadataCmd {
    /// HAR file to inspect
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub output: OutputFormat,
}

impl MetadataCmd {
    pub fn run(&self, color: bool) -> Result<()> {
        let result = get_meta_data(&Input::File(self.file.clone()));

        if let OutputFormat::Json = self.output {
            return print_json(&result, true);
        }

        let Some(name) = result.name else {
            bail!("{}", result.reason.unwrap_or_default());
        };

        let label = if color {
            "Collection".bold().to_string()
        } else {
            "Collection".to_string()
        };
        println!("{}: {}", label, name);
        Ok(())
    }
}
