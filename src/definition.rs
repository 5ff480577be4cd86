//! Host-facing system definitions: a serde-backed JSON description of a
//! key layout, plus the embedded English stenotype definition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StrokeError};
use crate::system::StrokeSystem;

/// Declarative description of a stroke system, as hosts would store it in
/// a profile file.
///
/// # Examples
///
/// ```
/// use steno_stroke::SystemDefinition;
///
/// let definition = SystemDefinition::from_json(
///     r##"{ "keys": ["#", "S-", "T-", "-E", "-S"] }"##,
/// )?;
/// let system = definition.build()?;
/// assert_eq!(system.key_count(), 5);
/// # Ok::<(), steno_stroke::StrokeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDefinition {
    /// Ordered key tokens; position = bit index.
    pub keys: Vec<String>,
    /// Explicit implicit-hyphen keys; auto-detected when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_hyphen_keys: Option<Vec<String>>,
    /// The number key; requires `digit_map`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_key: Option<String>,
    /// Key token to digit-alias token mapping; requires `number_key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digit_map: Option<BTreeMap<String, String>>,
}

impl SystemDefinition {
    /// Decodes a definition from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, StrokeError> {
        serde_json::from_str(json).map_err(|err| StrokeError::Definition(err.to_string()))
    }

    /// Validates the definition and derives the immutable system.
    pub fn build(&self) -> Result<StrokeSystem, ConfigError> {
        let mut builder = StrokeSystem::builder(self.keys.iter().cloned());
        if let Some(keys) = &self.implicit_hyphen_keys {
            builder = builder.implicit_hyphen_keys(keys.iter().cloned());
        }
        if let Some(key) = &self.number_key {
            builder = builder.number_key(key.clone());
        }
        if let Some(map) = &self.digit_map {
            builder = builder.digit_map(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        builder.build()
    }
}

impl StrokeSystem {
    /// The standard English stenotype layout, from the embedded
    /// definition.
    pub fn english() -> Result<Self, StrokeError> {
        let definition = SystemDefinition::from_json(include_str!("english.json"))?;
        Ok(definition.build()?)
    }
}
