//! Per-object property store with an optional file-backed side
//!
//! In-memory properties are a plain string map. An object may additionally be
//! attached to a TOML file; reads from that file propagate I/O and parse
//! failures to the caller instead of swallowing them.

use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec2;

/// Errors surfaced by the property store
#[derive(Error, Debug)]
pub enum PropertyError {
    /// The object has no properties file attached
    #[error("no properties file attached to this game object")]
    NoPropertiesFile,

    /// Reading the backing file failed
    #[error("failed to read properties file: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid TOML
    #[error("failed to parse properties file: {0}")]
    Parse(String),

    /// The requested property does not exist
    #[error("property not found: {0}")]
    Missing(String),

    /// The property exists but has an unexpected shape
    #[error("property `{key}` is not a {expected}")]
    WrongType {
        /// The property that was looked up
        key: String,
        /// What the caller expected it to be
        expected: &'static str,
    },
}

fn parse_table(path: &Path) -> Result<toml::Table, PropertyError> {
    let text = std::fs::read_to_string(path)?;
    text.parse::<toml::Table>()
        .map_err(|e| PropertyError::Parse(e.to_string()))
}

/// Read one top-level property from a TOML-backed properties file.
///
/// String values are returned as-is; other scalar values are rendered in
/// their TOML form.
pub(crate) fn read_property_from_file(path: &Path, key: &str) -> Result<String, PropertyError> {
    let table = parse_table(path)?;
    match table.get(key) {
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(PropertyError::Missing(key.to_string())),
    }
}

fn as_coordinate(value: &toml::Value) -> Option<f32> {
    value
        .as_float()
        .map(|f| f as f32)
        .or_else(|| value.as_integer().map(|i| i as f32))
}

/// Read the well-known `key_properties.location` entry, if present.
pub(crate) fn read_location_from_file(path: &Path) -> Result<Option<Vec2>, PropertyError> {
    let table = parse_table(path)?;
    let Some(key_properties) = table.get("key_properties") else {
        return Ok(None);
    };
    let key_properties =
        key_properties
            .as_table()
            .ok_or_else(|| PropertyError::WrongType {
                key: "key_properties".to_string(),
                expected: "table",
            })?;
    let Some(location) = key_properties.get("location") else {
        return Ok(None);
    };
    let entries = location.as_array().ok_or_else(|| PropertyError::WrongType {
        key: "location".to_string(),
        expected: "two-element array",
    })?;
    if entries.len() != 2 {
        return Err(PropertyError::WrongType {
            key: "location".to_string(),
            expected: "two-element array",
        });
    }
    let x = as_coordinate(&entries[0]);
    let y = as_coordinate(&entries[1]);
    match (x, y) {
        (Some(x), Some(y)) => Ok(Some(Vec2::new(x, y))),
        _ => Err(PropertyError::WrongType {
            key: "location".to_string(),
            expected: "numeric coordinate pair",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("brine_props_{name}_{}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_string_property() {
        let path = write_temp("string", "greeting = \"hello\"\n");
        assert_eq!(read_property_from_file(&path, "greeting").unwrap(), "hello");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_property_is_an_error() {
        let path = write_temp("missing", "greeting = \"hello\"\n");
        let err = read_property_from_file(&path, "absent").unwrap_err();
        assert!(matches!(err, PropertyError::Missing(key) if key == "absent"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let path = Path::new("/definitely/not/here.toml");
        assert!(matches!(
            read_property_from_file(path, "anything"),
            Err(PropertyError::Io(_))
        ));
    }

    #[test]
    fn test_read_location() {
        let path = write_temp("location", "[key_properties]\nlocation = [120, 48]\n");
        let location = read_location_from_file(&path).unwrap().unwrap();
        assert_eq!(location, Vec2::new(120.0, 48.0));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_location_absent_is_none() {
        let path = write_temp("no_location", "greeting = \"hello\"\n");
        assert!(read_location_from_file(&path).unwrap().is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_location_is_rejected() {
        let path = write_temp("bad_location", "[key_properties]\nlocation = [1, 2, 3]\n");
        assert!(matches!(
            read_location_from_file(&path),
            Err(PropertyError::WrongType { .. })
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
