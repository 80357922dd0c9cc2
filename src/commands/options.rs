use crate::output::json::print_json;
use crate::output::table::{print_defaults, print_options_table};
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use har2postman::{get_options, Criteria, Mode, OptionsView, Usage};

#[derive(Debug, Args)]
pub struct OptionsCmd {
    /// Only list options with this usage (repeatable)
    #[arg(short, long)]
    pub usage: Vec<Usage>,

    /// document: full descriptions, use: default values
    #[arg(short, long, default_value = "document")]
    pub mode: Mode,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub output: OutputFormat,
}

impl OptionsCmd {
    pub fn run(&self, color: bool) -> Result<()> {
        let criteria = Criteria {
            usage: (!self.usage.is_empty()).then(|| self.usage.clone()),
        };
        let view = get_options(self.mode, &criteria);

        match (self.output, &view) {
            (OutputFormat::Json, _) => print_json(&view, true)?,
            (OutputFormat::Table, OptionsView::Document(options)) => {
                print_options_table(options, color)
            }
            (OutputFormat::Table, OptionsView::Use(defaults)) => print_defaults(defaults, color),
        }
        Ok(())
    }
}
