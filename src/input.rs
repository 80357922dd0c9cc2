//! Conversion input: a HAR file path or an in-memory HAR string.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    String(String),
}

impl Input {
    /// Build an input from a `{type, data}` descriptor
    pub fn from_descriptor(kind: &str, data: Option<&str>) -> Result<Self> {
        let data = match data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(Error::input("Input.data not provided")),
        };

        match kind {
            "file" => Ok(Input::File(PathBuf::from(data))),
            "string" => Ok(Input::String(data.to_string())),
            other => Err(Error::input(format!(
                "Invalid input type ({}). Type must be file/string.",
                other
            ))),
        }
    }

    /// Raw HAR text.
    ///
    /// File errors only name the last path segment.
    pub fn read(&self) -> Result<String> {
        match self {
            Input::String(data) if data.is_empty() => Err(Error::input("Input.data not provided")),
            Input::String(data) => Ok(data.clone()),
            Input::File(path) if path.as_os_str().is_empty() => {
                Err(Error::input("Input.data not provided"))
            }
            Input::File(path) => fs::read_to_string(path).map_err(|err| {
                tracing::debug!("Cannot read {}: {}", path.display(), err);
                Error::input(format!("File {} not found", file_name(path)))
            }),
        }
    }

    /// Collection name suggested by the input itself: the file stem
    pub fn name_hint(&self) -> Option<String> {
        match self {
            Input::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| !stem.is_empty()),
            Input::String(_) => None,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_descriptor() {
        assert_eq!(
            Input::from_descriptor("string", Some("{}")).unwrap(),
            Input::String("{}".to_string())
        );
        assert_eq!(
            Input::from_descriptor("file", Some("/tmp/a.har")).unwrap(),
            Input::File(PathBuf::from("/tmp/a.har"))
        );

        let err = Input::from_descriptor("string", None).unwrap_err();
        assert_eq!(err.to_string(), "Input.data not provided");
        let err = Input::from_descriptor("file", Some("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);

        let err = Input::from_descriptor("folder", Some("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input type (folder). Type must be file/string."
        );
    }

    #[test]
    fn test_missing_file_hides_directories() {
        let err = Input::File(PathBuf::from("/some/private/dir/missing.har"))
            .read()
            .unwrap_err();
        assert_eq!(err.to_string(), "File missing.har not found");
    }

    #[test]
    fn test_name_hint() {
        assert_eq!(
            Input::File(PathBuf::from("fixtures/queryParams.har")).name_hint(),
            Some("queryParams".to_string())
        );
        assert_eq!(Input::String("{}".to_string()).name_hint(), None);
    }
}
