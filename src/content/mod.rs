//! Content items and dynamic attribute lookup.
//!
//! Conditions reference content attributes by free-form field name
//! ("engagement", "age", "content", "author", ...). Rather than a closed
//! struct, the engine reads content through the [`Attributes`] trait:
//! "look up a field by name, get a value or nothing". New fields need no
//! engine changes.
//!
//! [`ContentItem`] is the bundled implementation; plain
//! `HashMap<String, Value>` and `BTreeMap<String, Value>` work too.

mod item;
mod value;

pub use item::{Attributes, ContentItem};
pub use value::Value;

pub(crate) use value::parse_number;
