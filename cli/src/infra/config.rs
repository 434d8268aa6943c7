//! Infrastructure implementation of the `ConfigStore` port.

use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::application::ports::{ConfigLocation, ConfigStore};
use crate::domain::{ConfigError, ConfigValues, ParameterKey};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Production implementation of `ConfigStore` that reads a flat JSON object
/// from disk.
pub struct JsonConfigStore;

impl ConfigStore for JsonConfigStore {
    fn load(&self, location: &ConfigLocation) -> Result<ConfigValues> {
        let path = location.path();
        if !path.exists() {
            if location.is_explicit() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
            }
            tracing::debug!(path = %path.display(), "no config file, using other sources");
            return Ok(ConfigValues::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse_config(path, &content)
    }
}

/// Parses config file content into resolver values.
///
/// Unknown keys are ignored whatever their value. For recognized keys,
/// scalars become strings, `null` is treated as absent, arrays of scalars
/// are joined with `,` and nested objects are rejected.
///
/// # Errors
///
/// Returns `ConfigError::Malformed` when the content is not a JSON object
/// and `ConfigError::InvalidEntry` for nested values under recognized keys.
pub fn parse_config(path: &Path, content: &str) -> Result<ConfigValues> {
    let root: Value = serde_json::from_str(content).map_err(|e| ConfigError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let Value::Object(map) = root else {
        return Err(ConfigError::Malformed {
            path: path.to_path_buf(),
            message: "expected a JSON object at the top level".to_string(),
        }
        .into());
    };

    let (values, _) = ConfigValues::from_entries(flatten(map)?);
    Ok(values)
}

fn flatten(map: Map<String, Value>) -> Result<Vec<(String, String)>, ConfigError> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        if ParameterKey::from_config_name(&key).is_none() {
            tracing::debug!(key = %key, "ignoring unknown config key");
            continue;
        }
        if let Some(text) = stringify(&key, &value)? {
            entries.push((key, text));
        }
    }
    Ok(entries)
}

fn stringify(key: &str, value: &Value) -> Result<Option<String>, ConfigError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Bool(b) => Ok(b.to_string()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(ConfigError::InvalidEntry {
                        key: key.to_string(),
                        reason: "arrays may only contain strings, numbers or booleans".to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(ConfigError::InvalidEntry {
            key: key.to_string(),
            reason: "nested objects are not supported; use flat key/value pairs".to_string(),
        }),
    }
}
