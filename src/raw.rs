//! Dynamically-keyed input records.
//!
//! A [`RawRecord`] is what an XML-to-mapping step hands over for one
//! `<METAR>` element: scalar text (occasionally already-typed numbers or
//! booleans) at the leaves, mappings for attribute-bearing elements such as
//! `<sky_condition>` and `<quality_control_flags>`, and sequences wherever
//! an element repeats.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// One decoded observation: field name to raw value
pub type RawRecord = BTreeMap<String, RawValue>;

/// A single raw value as produced by the deserialization step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Scalar text form of this value, `None` for mappings and sequences
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            RawValue::Number(n) => Some(Cow::Owned(n.to_string())),
            RawValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            RawValue::Null | RawValue::List(_) | RawValue::Map(_) => None,
        }
    }

    /// Human-readable rendering for error messages and logs
    pub fn describe(&self) -> String {
        match self.as_text() {
            Some(text) => text.into_owned(),
            None => serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self)),
        }
    }

    /// Parse this value as a finite float; "NaN" and "inf" are rejected
    pub fn to_f64(&self) -> Option<f64> {
        let parsed = match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|f| f.is_finite())
    }

    /// Parse this value as an integer, accepting integral floats ("5.0")
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) => integral(*n),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }
    }

    /// Normalize a mapping-or-sequence into a list of mappings.
    ///
    /// A lone mapping becomes a one-element list; non-mapping items in a
    /// sequence are dropped.
    pub fn mappings(&self) -> Vec<&BTreeMap<String, RawValue>> {
        match self {
            RawValue::Map(map) => vec![map],
            RawValue::List(items) => items
                .iter()
                .filter_map(|item| match item {
                    RawValue::Map(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Look up a key when this value is a mapping
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::List(items) => items.is_empty(),
            RawValue::Map(map) => map.is_empty(),
            RawValue::Bool(_) | RawValue::Number(_) => false,
        }
    }
}

/// Whole floats strictly inside the i64 range
fn integral(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawValue {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RawValue::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
