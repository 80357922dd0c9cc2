use crate::output::truncate;
use colored::Colorize;
use har2postman::options::{OptionDefault, OptionDescriptor, OptionType};
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

const MAX_DESCRIPTION_LEN: usize = 60;

#[derive(Tabled)]
pub struct OptionRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Default")]
    pub default: String,
    #[tabled(rename = "Allowed")]
    pub allowed: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl OptionRow {
    pub fn from_descriptor(option: &OptionDescriptor, color: bool) -> Self {
        let id = if color {
            option.id.cyan().to_string()
        } else {
            option.id.to_string()
        };

        let kind = match option.kind {
            OptionType::Boolean => "boolean",
            OptionType::Enum => "enum",
        };

        let default = match option.default {
            OptionDefault::Bool(b) => b.to_string(),
            OptionDefault::Text(s) => s.to_string(),
        };

        let allowed: Vec<String> = option
            .allowed_values()
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        Self {
            id,
            kind: kind.to_string(),
            default: if color { default.yellow().to_string() } else { default },
            allowed: allowed.join(", "),
            description: truncate(option.description, MAX_DESCRIPTION_LEN),
        }
    }
}

pub fn print_options_table(options: &[OptionDescriptor], color: bool) {
    if options.is_empty() {
        println!("No options found.");
        return;
    }

    let rows: Vec<OptionRow> = options
        .iter()
        .map(|o| OptionRow::from_descriptor(o, color))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    println!("{}", table);
}

/// Print option defaults as `id = value` lines
pub fn print_defaults(defaults: &har2postman::OptionMap, color: bool) {
    for (id, value) in defaults {
        let id = if color { id.bold().to_string() } else { id.clone() };
        println!("{} = {}", id, value);
    }
}
