//! Declaration options (`FileOptions`, `MessageOptions`, ...).
//!
//! Options are kept as the raw JSON object. Standard options appear under their
//! JSON names (`deprecated`, `goPackage`, `mapEntry`); custom extensions appear
//! under bracketed, fully-qualified keys:
//!
//! ```json
//! { "deprecated": true, "[template.field_meta]": { "visibility": "PRIVATE" } }
//! ```
//!
//! Standard keys written in snake_case (`go_package`, `map_entry`) are stored
//! under their lowerCamel JSON name, so lookups use one spelling.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(BTreeMap<String, Value>);

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(key, value)| (json_key(key), value))
                .collect(),
        ))
    }
}

/// lowerCamel JSON name of a standard option key. Extension keys are kept
/// verbatim.
fn json_key(key: String) -> String {
    if key.starts_with('[') || !key.contains('_') {
        return key;
    }
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for hand-assembled options, mostly in tests.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(json_key(key.into()), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A boolean option; absent or non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The standard `deprecated` option shared by every options message.
    pub fn deprecated(&self) -> bool {
        self.flag("deprecated")
    }

    /// Look up a custom extension by its fully-qualified name.
    ///
    /// Accepts the name with or without a leading dot. An absent extension is
    /// an expected outcome and yields `None`.
    pub fn extension(&self, full_name: &str) -> Option<&Value> {
        let name = full_name.trim_start_matches('.');
        self.0.get(&format!("[{name}]"))
    }
}
