use crate::output::json::print_json;
use crate::output::OutputFormat;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use har2postman::{validate, Input};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateCmd {
    /// HAR file to check
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub output: OutputFormat,
}

impl ValidateCmd {
    pub fn run(&self, color: bool) -> Result<()> {
        let result = validate(&Input::File(self.file.clone()));

        if let OutputFormat::Json = self.output {
            return print_json(&result, true);
        }

        if !result.result {
            bail!("{}", result.reason);
        }

        let message = format!("{}: valid HAR", self.file.display());
        if color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
        Ok(())
    }
}
