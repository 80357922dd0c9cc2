//! Conversion options: the registry of supported options, validation of
//! user supplied option maps, and the resolved [`ProcessOptions`] the mapper
//! reads.

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Map, Value};

/// User supplied options, keyed by option id
pub type OptionMap = Map<String, Value>;

pub const INDENT_CHARACTER: &str = "indentCharacter";
pub const INCLUDE_COOKIES: &str = "includeCookies";
pub const INCLUDE_RESPONSES: &str = "includeResponses";
pub const FOLDER_STRATEGY: &str = "folderStrategy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Boolean,
    Enum,
}

/// Where an option applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Usage {
    Conversion,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionDefault {
    Bool(bool),
    Text(&'static str),
}

impl From<OptionDefault> for Value {
    fn from(value: OptionDefault) -> Self {
        match value {
            OptionDefault::Bool(b) => Value::Bool(b),
            OptionDefault::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// Description of one supported option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub default: OptionDefault,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_options: Option<&'static [&'static str]>,
    pub description: &'static str,
    pub external: bool,
    pub usage: &'static [Usage],
}

impl OptionDescriptor {
    /// Values accepted for this option
    pub fn allowed_values(&self) -> Vec<Value> {
        match self.kind {
            OptionType::Boolean => vec![Value::Bool(true), Value::Bool(false)],
            OptionType::Enum => self
                .available_options
                .unwrap_or(&[])
                .iter()
                .map(|v| Value::String(v.to_string()))
                .collect(),
        }
    }
}

static REGISTRY: [OptionDescriptor; 4] = [
    OptionDescriptor {
        name: "Set indent character",
        id: INDENT_CHARACTER,
        kind: OptionType::Enum,
        default: OptionDefault::Text("Space"),
        available_options: Some(&["Space", "Tab"]),
        description: "Option for setting indentation character",
        external: true,
        usage: &[Usage::Conversion],
    },
    OptionDescriptor {
        name: "Include cookies from import",
        id: INCLUDE_COOKIES,
        kind: OptionType::Boolean,
        default: OptionDefault::Bool(false),
        available_options: None,
        description: "Determines whether to include cookies in the request/response headers",
        external: true,
        usage: &[Usage::Conversion],
    },
    OptionDescriptor {
        name: "Include responses from import",
        id: INCLUDE_RESPONSES,
        kind: OptionType::Boolean,
        default: OptionDefault::Bool(true),
        available_options: None,
        description: "Determines whether to include responses in the generated collection",
        external: true,
        usage: &[Usage::Conversion],
    },
    OptionDescriptor {
        name: "Folder organization",
        id: FOLDER_STRATEGY,
        kind: OptionType::Enum,
        default: OptionDefault::Text("Page"),
        available_options: Some(&["None", "Page"]),
        description: "Select whether to create folders according to pages or without folders",
        external: true,
        usage: &[Usage::Conversion],
    },
];

/// Every option this converter understands
pub fn registry() -> &'static [OptionDescriptor] {
    &REGISTRY
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Full option descriptors
    #[default]
    Document,
    /// Default value of each option
    Use,
}

/// Filter for [`get_options`]
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Keep options supporting any of these usages; `None` keeps all
    pub usage: Option<Vec<Usage>>,
}

/// Output of [`get_options`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionsView {
    Document(Vec<OptionDescriptor>),
    Use(OptionMap),
}

pub fn get_options(mode: Mode, criteria: &Criteria) -> OptionsView {
    let selected: Vec<OptionDescriptor> = registry()
        .iter()
        .filter(|option| match &criteria.usage {
            Some(usages) => usages.iter().any(|u| option.usage.contains(u)),
            None => true,
        })
        .cloned()
        .collect();

    match mode {
        Mode::Document => OptionsView::Document(selected),
        Mode::Use => OptionsView::Use(defaults_map(&selected)),
    }
}

fn defaults_map(options: &[OptionDescriptor]) -> OptionMap {
    options
        .iter()
        .map(|option| {
            let value = match (option.id, option.default) {
                (INDENT_CHARACTER, OptionDefault::Text("Tab")) => Value::from("\t"),
                (INDENT_CHARACTER, _) => Value::from("  "),
                (_, default) => Value::from(default),
            };
            (option.id.to_string(), value)
        })
        .collect()
}

/// Check every provided option against the registry
pub fn validate_options(provided: &OptionMap, registry: &[OptionDescriptor]) -> Result<()> {
    for (key, value) in provided {
        let descriptor = registry
            .iter()
            .find(|option| option.id == key)
            .ok_or_else(|| Error::OptionNotFound(key.clone()))?;

        let allowed = descriptor.allowed_values();
        if !allowed.contains(value) {
            let listed: Vec<String> = allowed.iter().map(display_value).collect();
            return Err(Error::OptionValue(format!(
                "Value '{}' is not allowed by '{}' option. Allowed values are ({}).",
                display_value(value),
                key,
                listed.join(", ")
            )));
        }
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How JSON bodies are re-indented
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndentCharacter {
    /// One space per level
    #[default]
    Space,
    Tab,
    /// Literal indent string
    Custom(String),
}

impl IndentCharacter {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("tab") {
            IndentCharacter::Tab
        } else if value.eq_ignore_ascii_case("space") {
            IndentCharacter::Space
        } else {
            IndentCharacter::Custom(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IndentCharacter::Space => " ",
            IndentCharacter::Tab => "\t",
            IndentCharacter::Custom(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderStrategy {
    /// Flat item list
    None,
    /// One folder per HAR page
    #[default]
    Page,
}

/// Resolved options for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    pub indent_character: IndentCharacter,
    pub include_cookies: bool,
    pub include_responses: bool,
    pub folder_strategy: FolderStrategy,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            indent_character: IndentCharacter::default(),
            include_cookies: false,
            include_responses: true,
            folder_strategy: FolderStrategy::default(),
        }
    }
}

impl ProcessOptions {
    /// Validate an option map and resolve it over the defaults
    pub fn from_map(provided: &OptionMap) -> Result<Self> {
        validate_options(provided, registry())?;

        let mut options = Self::default();
        if let Some(indent) = provided.get(INDENT_CHARACTER).and_then(Value::as_str) {
            options.indent_character = IndentCharacter::parse(indent);
        }
        if let Some(include) = provided.get(INCLUDE_COOKIES).and_then(Value::as_bool) {
            options.include_cookies = include;
        }
        if let Some(include) = provided.get(INCLUDE_RESPONSES).and_then(Value::as_bool) {
            options.include_responses = include;
        }
        if let Some(strategy) = provided.get(FOLDER_STRATEGY).and_then(Value::as_str) {
            options.folder_strategy = match strategy {
                "None" => FolderStrategy::None,
                _ => FolderStrategy::Page,
            };
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn map(value: Value) -> OptionMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_document_mode_lists_all_options() {
        let OptionsView::Document(options) = get_options(Mode::Document, &Criteria::default())
        else {
            panic!("expected descriptors");
        };
        let ids: Vec<&str> = options.iter().map(|o| o.id).collect();
        assert_eq!(
            ids,
            vec![INDENT_CHARACTER, INCLUDE_COOKIES, INCLUDE_RESPONSES, FOLDER_STRATEGY]
        );
        assert!(options.iter().all(|o| o.external));
    }

    #[test]
    fn test_use_mode_flattens_defaults() {
        let OptionsView::Use(defaults) = get_options(Mode::Use, &Criteria::default()) else {
            panic!("expected defaults");
        };
        assert_eq!(defaults[INDENT_CHARACTER], json!("  "));
        assert_eq!(defaults[INCLUDE_COOKIES], json!(false));
        assert_eq!(defaults[INCLUDE_RESPONSES], json!(true));
        assert_eq!(defaults[FOLDER_STRATEGY], json!("Page"));
    }

    #[test]
    fn test_usage_criteria_filters() {
        let criteria = Criteria {
            usage: Some(vec![Usage::Validation]),
        };
        let OptionsView::Use(defaults) = get_options(Mode::Use, &criteria) else {
            panic!("expected defaults");
        };
        assert!(defaults.is_empty());

        let criteria = Criteria {
            usage: Some(vec![Usage::Validation, Usage::Conversion]),
        };
        let OptionsView::Document(options) = get_options(Mode::Document, &criteria) else {
            panic!("expected descriptors");
        };
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn test_descriptor_serialization() {
        let value = serde_json::to_value(&registry()[3]).unwrap();
        assert_eq!(value["type"], json!("enum"));
        assert_eq!(value["availableOptions"], json!(["None", "Page"]));
        assert_eq!(value["usage"], json!(["CONVERSION"]));

        let value = serde_json::to_value(&registry()[1]).unwrap();
        assert_eq!(value["default"], json!(false));
        assert!(value.get("availableOptions").is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_enum_value() {
        let err = validate_options(&map(json!({"folderStrategy": "Bogus"})), registry())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionValue);
        assert_eq!(
            err.to_string(),
            "Value 'Bogus' is not allowed by 'folderStrategy' option. Allowed values are (None, Page)."
        );
    }

    #[test]
    fn test_validate_rejects_non_boolean() {
        let err = validate_options(&map(json!({"includeCookies": "yes"})), registry())
            .unwrap_err();
        assert!(err.to_string().contains("(true, false)"));
    }

    #[test]
    fn test_validate_rejects_unknown_option() {
        let err = validate_options(&map(json!({"colour": "red"})), registry()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionNotFound);
    }

    #[test]
    fn test_validate_accepts_allowed_values() {
        let provided = map(json!({"folderStrategy": "None", "indentCharacter": "Tab"}));
        assert!(validate_options(&provided, registry()).is_ok());
        assert!(validate_options(&OptionMap::new(), registry()).is_ok());
    }

    #[test]
    fn test_process_options_from_map() {
        let options = ProcessOptions::from_map(&map(json!({
            "indentCharacter": "Tab",
            "includeCookies": true,
            "includeResponses": false,
            "folderStrategy": "None"
        })))
        .unwrap();
        assert_eq!(options.indent_character, IndentCharacter::Tab);
        assert!(options.include_cookies);
        assert!(!options.include_responses);
        assert_eq!(options.folder_strategy, FolderStrategy::None);

        let defaults = ProcessOptions::from_map(&OptionMap::new()).unwrap();
        assert_eq!(defaults, ProcessOptions::default());
        assert_eq!(defaults.indent_character.as_str(), " ");
    }

    #[test]
    fn test_indent_character_parse() {
        assert_eq!(IndentCharacter::parse("tab").as_str(), "\t");
        assert_eq!(IndentCharacter::parse("Space").as_str(), " ");
        assert_eq!(IndentCharacter::parse("   ").as_str(), "   ");
    }
}
