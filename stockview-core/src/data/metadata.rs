//! Company metadata: a loose field map with typed, presence-checked accessors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider field names read by the metrics table.
pub mod fields {
    pub const LONG_NAME: &str = "longName";
    pub const SECTOR: &str = "sector";
    pub const INDUSTRY: &str = "industry";
    pub const MARKET_CAP: &str = "marketCap";
    pub const FORWARD_PE: &str = "forwardPE";
    pub const DIVIDEND_YIELD: &str = "dividendYield";
    pub const FIFTY_TWO_WEEK_HIGH: &str = "fiftyTwoWeekHigh";
    pub const FIFTY_TWO_WEEK_LOW: &str = "fiftyTwoWeekLow";
}

/// Field name → raw provider value (string, number, or null).
///
/// Every accessor returns `Option`, so callers must branch on presence before
/// formatting anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyMetadata {
    fields: BTreeMap<String, Value>,
}

impl CompanyMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field as display text. Numbers and booleans are stringified; null,
    /// arrays, objects and blank strings count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Field as a finite number. Anything else (missing, null, a string such
    /// as "Infinity", NaN) is `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for CompanyMetadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
