//! Convert HAR captures into Postman Collection v2.1 documents.
//!
//! ```no_run
//! use har2postman::{convert, Input, OptionMap};
//!
//! let input = Input::File("capture.har".into());
//! let result = convert(&input, &OptionMap::new())?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collection;
pub mod error;
pub mod har;
pub mod input;
pub mod mapper;
pub mod options;
pub mod urls;
pub mod validator;

pub use collection::Collection;
pub use error::{Error, ErrorKind, Result, SchemaViolation};
pub use input::Input;
pub use options::{get_options, Criteria, Mode, OptionMap, OptionsView, ProcessOptions, Usage};

use serde::Serialize;
use serde_json::Value;

pub const COLLECTION_TYPE: &str = "collection";
pub const VALIDATION_SUCCESS: &str = "Success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub result: bool,
    pub reason: String,
}

impl ValidationResult {
    fn failure(err: &Error) -> Self {
        Self {
            result: false,
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOutput {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<ConversionOutput>,
}

impl ConversionResult {
    /// The converted collection, when the conversion succeeded
    pub fn collection(&self) -> Option<&Collection> {
        self.output.first().map(|o| &o.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaDataOutput {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaDataResult {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<MetaDataOutput>,
}

/// Read, parse and structurally check an input
fn load(input: &Input) -> Result<Value> {
    let text = input.read()?;
    let document = har::parse_json(&text)?;
    validator::validate_structure(&document)?;
    Ok(document)
}

/// Check that an input holds a structurally valid HAR document
pub fn validate(input: &Input) -> ValidationResult {
    match load(input) {
        Ok(_) => ValidationResult {
            result: true,
            reason: VALIDATION_SUCCESS.to_string(),
        },
        Err(err) => ValidationResult::failure(&err),
    }
}

/// Convert an input into a collection.
///
/// Option errors are returned as `Err` before the input is read. Input,
/// parse and structural errors give a failed result carrying the reason.
pub fn convert(input: &Input, options: &OptionMap) -> Result<ConversionResult> {
    let options = ProcessOptions::from_map(options)?;

    let document = match load(input) {
        Ok(document) => document,
        Err(err) => {
            tracing::debug!("Input rejected: {}", err);
            return Ok(ConversionResult {
                result: false,
                reason: Some(err.to_string()),
                output: Vec::new(),
            });
        }
    };

    let har = har::from_value(&document);
    let collection = mapper::map(&har, &options, input.name_hint().as_deref());
    Ok(ConversionResult {
        result: true,
        reason: None,
        output: vec![ConversionOutput {
            kind: COLLECTION_TYPE.to_string(),
            data: collection,
        }],
    })
}

/// Name the collection would get, without mapping any entry
pub fn get_meta_data(input: &Input) -> MetaDataResult {
    let document = match load(input) {
        Ok(document) => document,
        Err(err) => {
            return MetaDataResult {
                result: false,
                reason: Some(err.to_string()),
                name: None,
                output: Vec::new(),
            }
        }
    };

    let har = har::from_value(&document);
    let name = mapper::collection_name(&har, input.name_hint().as_deref());
    MetaDataResult {
        result: true,
        reason: None,
        output: vec![MetaDataOutput {
            kind: COLLECTION_TYPE.to_string(),
            name: name.clone(),
        }],
        name: Some(name),
    }
}
