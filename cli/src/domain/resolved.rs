//! Resolver inputs and output: CLI values, config-file values, and the final
//! per-invocation parameter set.

use std::collections::BTreeMap;

use crate::domain::error::ConfigError;
use crate::domain::param::{ParameterKey, ParameterSource};

/// Values supplied on the command line, keyed by parameter.
///
/// An entry with an empty string means the flag was passed with an empty
/// value (`--icon-uri ""`).
pub type CliArgs = BTreeMap<ParameterKey, String>;

/// Flat key/value entries loaded from the JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    entries: BTreeMap<ParameterKey, String>,
}

impl ConfigValues {
    /// Build from `(config-file name, value)` pairs. Canonical names win over
    /// aliases; unknown names are returned so callers can log them.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut canonical = BTreeMap::new();
        let mut aliased = BTreeMap::new();
        let mut unknown = Vec::new();
        for (name, value) in entries {
            match ParameterKey::from_config_name(&name) {
                Some(key) if key.as_str() == name => {
                    canonical.insert(key, value);
                }
                Some(key) => {
                    aliased.insert(key, value);
                }
                None => unknown.push(name),
            }
        }
        for (key, value) in aliased {
            canonical.entry(key).or_insert(value);
        }
        (Self { entries: canonical }, unknown)
    }

    #[must_use]
    pub fn get(&self, key: ParameterKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A resolved value and the source it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub value: String,
    pub source: ParameterSource,
}

/// Partial-patch state of one updatable field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate {
    /// Not supplied; leave the server value unchanged.
    #[default]
    Keep,
    /// Supplied as empty; clear the field.
    Clear,
    /// Supplied with a value.
    Set(String),
}

impl FieldUpdate {
    #[must_use]
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// The final parameter set for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: BTreeMap<ParameterKey, ResolvedValue>,
    env_prefix: String,
}

impl ResolvedConfig {
    /// Empty set resolved under `env_prefix`.
    #[must_use]
    pub fn with_env_prefix(env_prefix: &str) -> Self {
        Self {
            values: BTreeMap::new(),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Prefix of the environment variables this set was resolved from.
    #[must_use]
    pub fn env_prefix(&self) -> &str {
        if self.env_prefix.is_empty() {
            crate::domain::param::DEFAULT_ENV_PREFIX
        } else {
            &self.env_prefix
        }
    }

    pub(crate) fn insert(&mut self, key: ParameterKey, value: String, source: ParameterSource) {
        self.values.insert(key, ResolvedValue { value, source });
    }

    /// The value for `key`, if resolved.
    #[must_use]
    pub fn get(&self, key: ParameterKey) -> Option<&str> {
        self.values.get(&key).map(|v| v.value.as_str())
    }

    /// The source `key` was resolved from, if resolved.
    #[must_use]
    pub fn source(&self, key: ParameterKey) -> Option<ParameterSource> {
        self.values.get(&key).map(|v| v.source)
    }

    /// The value for a key the action declared as required.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` if the key was not resolved.
    /// The resolver guarantees required keys are present, so this only fails
    /// when a service asks for a key its action spec does not require.
    pub fn require(&self, key: ParameterKey) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingRequired {
            key,
            flag: key.flag(),
            env: key.env_var(self.env_prefix()),
        })
    }

    /// Patch state for an updatable key.
    #[must_use]
    pub fn field_update(&self, key: ParameterKey) -> FieldUpdate {
        match self.get(key) {
            None => FieldUpdate::Keep,
            Some("") => FieldUpdate::Clear,
            Some(value) => FieldUpdate::Set(value.to_string()),
        }
    }

    /// Resolved entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
