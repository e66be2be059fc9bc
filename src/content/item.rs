//! Content item record and the attribute lookup trait.

use std::collections::{BTreeMap, HashMap};

use super::value::Value;

/// Attribute lookup by field name.
///
/// This is the only view of content the engine needs. An absent field
/// returns `None`; conditions on absent fields never match.
pub trait Attributes {
    /// Returns the value stored under `field`, if any.
    fn attribute(&self, field: &str) -> Option<&Value>;
}

impl Attributes for HashMap<String, Value> {
    fn attribute(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl Attributes for BTreeMap<String, Value> {
    fn attribute(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<A: Attributes + ?Sized> Attributes for &A {
    fn attribute(&self, field: &str) -> Option<&Value> {
        (**self).attribute(field)
    }
}

/// A content item: an identifier plus an open set of named attributes.
///
/// # Examples
///
/// ```
/// use feedlab::content::{Attributes, ContentItem, Value};
///
/// let post = ContentItem::new("post-1")
///     .with_text("content", "Ten tips for Rust newcomers")
///     .with_number("engagement", 150.0)
///     .with_flag("has_media", true);
///
/// assert_eq!(post.attribute("engagement"), Some(&Value::Number(150.0)));
/// assert!(post.attribute("author").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawContentItem"))]
pub struct ContentItem {
    /// Caller-assigned identifier, opaque to the engine.
    ///
    /// The id is not an attribute: a condition on field `"id"` only sees
    /// an explicitly inserted `"id"` attribute.
    pub id: String,

    /// Named attributes.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: BTreeMap<String, Value>,
}

impl ContentItem {
    /// Creates an item with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(field.into(), value.into());
    }

    /// Sets an attribute from anything convertible into a [`Value`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a numeric attribute.
    pub fn with_number(self, field: impl Into<String>, n: f64) -> Self {
        self.with(field, Value::Number(n))
    }

    /// Sets a text attribute.
    pub fn with_text(self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(field, Value::Text(text.into()))
    }

    /// Sets a boolean attribute.
    pub fn with_flag(self, field: impl Into<String>, flag: bool) -> Self {
        self.with(field, Value::Bool(flag))
    }

    /// Sets a string-list attribute such as tags.
    pub fn with_list<S: Into<String>>(
        self,
        field: impl Into<String>,
        items: impl IntoIterator<Item = S>,
    ) -> Self {
        let list = items.into_iter().map(Into::into).collect();
        self.with(field, Value::List(list))
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.attributes.remove(field)
    }

    /// Number of attributes set on this item.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the item has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Wire shape accepted when deserializing a [`ContentItem`].
///
/// Batches come from the browser as-is. A missing or non-text id becomes
/// empty (numbers are rendered), and attributes holding anything other
/// than a number, text, boolean or string list (null, nested objects,
/// mixed arrays) are dropped, so the item is still scored with
/// absent-field semantics instead of failing the whole batch.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawContentItem {
    #[serde(default)]
    id: Option<RawValue>,
    #[serde(flatten)]
    attributes: BTreeMap<String, RawValue>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<String>),
    Other(serde::de::IgnoredAny),
}

#[cfg(feature = "serde")]
impl RawValue {
    fn into_value(self) -> Option<Value> {
        match self {
            RawValue::Number(n) => Some(Value::Number(n)),
            RawValue::Text(s) => Some(Value::Text(s)),
            RawValue::Bool(b) => Some(Value::Bool(b)),
            RawValue::List(items) => Some(Value::List(items)),
            RawValue::Other(_) => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RawContentItem> for ContentItem {
    fn from(raw: RawContentItem) -> Self {
        let id = match raw.id.and_then(RawValue::into_value) {
            Some(Value::Text(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let attributes = raw
            .attributes
            .into_iter()
            .filter_map(|(field, value)| value.into_value().map(|v| (field, v)))
            .collect();
        Self { id, attributes }
    }
}

impl Attributes for ContentItem {
    fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }
}
