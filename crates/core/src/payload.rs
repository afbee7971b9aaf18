//! Settings payload decoded from the `json` endpoint
//!
//! The payload is a flat JSON object mapping control names to values. Key
//! order is the document's own order; nesting is never interpreted.

use serde_json::{Map, Value};

use crate::error::FetchError;

/// A single value of the settings payload
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    List(Vec<SettingValue>),
    /// Carried through untouched, no control accepts it
    Object(Map<String, Value>),
}

impl SettingValue {
    /// Text form of the value as an input's `value` property would hold it
    ///
    /// Lists render comma-joined. Objects have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(number_text(n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => Some(String::new()),
            Self::List(items) => items
                .iter()
                .map(Self::as_text)
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(",")),
            Self::Object(_) => None,
        }
    }

    /// Short name of the JSON type, used in diagnostics
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::List(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Render a number the way a script assigning it to `value` would
///
/// Integral floats print without a fraction, `-0` prints as `0`, and
/// magnitudes outside `[1e-6, 1e21)` use exponent form (`1e+21`, `1.5e-7`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 {
        return format!("{f:e}").replace('e', "e+");
    }
    if magnitude < 1e-6 {
        return format!("{f:e}");
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n),
            Value::Bool(b) => Self::Bool(b),
            Value::Null => Self::Null,
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(map),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

/// Ordered key/value pairs of one settings response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPayload {
    entries: Vec<(String, SettingValue)>,
}

impl SettingsPayload {
    /// Decode a response body. Anything but a JSON object is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn parse(body: &str) -> Result<Self, FetchError> {
        Self::from_slice(body.as_bytes())
    }

    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map
                    .into_iter()
                    .map(|(key, value)| (key, SettingValue::from(value)))
                    .collect(),
            }),
            other => Err(FetchError::NotAnObject(SettingValue::from(other).type_name())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SettingValue)> for SettingsPayload {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        let mut payload = Self::default();
        for (key, value) in iter {
            // Later duplicates replace earlier ones, as in a JSON object
            if let Some(slot) = payload.entries.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                payload.entries.push((key, value));
            }
        }
        payload
    }
}
