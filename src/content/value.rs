//! Attribute values and their coercions.

use std::borrow::Cow;
use std::fmt;

/// A single attribute value on a content item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Numeric attribute (engagement counts, age in hours, scores).
    Number(f64),
    /// Free text (post body, author handle).
    Text(String),
    /// Flag (e.g. media presence).
    Bool(bool),
    /// Tag-like list of strings.
    List(Vec<String>),
}

impl Value {
    /// Numeric view of the value.
    ///
    /// Numbers pass through; text is parsed after trimming. Booleans and
    /// lists have no numeric reading.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_number(s),
            Value::Bool(_) | Value::List(_) => None,
        }
    }

    /// Text view of the value.
    ///
    /// Numbers use `Display` (`150.0` reads `"150"`), booleans read
    /// `"true"`/`"false"`, and lists are comma-joined.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::List(items) => Cow::Owned(items.join(",")),
        }
    }
}

/// Parses a trimmed, non-empty string as `f64`.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}
