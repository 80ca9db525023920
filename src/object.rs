//! PDF object model for the writer.
//!
//! A deliberately small subset of the PDF object types: exactly what the
//! fixed output schema (fonts, optional image, content stream, page, pages,
//! catalog) needs.

use std::collections::BTreeMap;

/// A PDF object value.
///
/// Dictionaries use a [`BTreeMap`] so keys always serialize in sorted order,
/// keeping repeated renders byte-identical.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(BTreeMap<String, Object>),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary; `/Length` is filled in at serialization.
        dict: BTreeMap<String, Object>,
        /// Stream data
        data: Vec<u8>,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

impl Object {
    /// Collect every object number this value references, recursively.
    pub fn collect_references(&self, out: &mut Vec<u32>) {
        match self {
            Object::Reference(r) => out.push(r.number),
            Object::Array(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Object::Dictionary(dict) | Object::Stream { dict, .. } => {
                for value in dict.values() {
                    value.collect_references(out);
                }
            }
            Object::Integer(_) | Object::Real(_) | Object::Name(_) => {}
        }
    }
}

/// Reference to an indirect object.
///
/// Generation numbers are always zero in freshly generated files, so only
/// the object number is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number, positive and unique within a document.
    pub number: u32,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.number)
    }
}

/// One object scheduled for serialization.
///
/// Definitions live for a single serialization pass; numbers are assigned in
/// strict ascending order starting at 1 before any body is serialized.
#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    /// The assigned object number.
    pub number: u32,
    /// The object's body.
    pub body: Object,
}

impl ObjectDefinition {
    /// Create a definition for the given number and body.
    pub fn new(number: u32, body: Object) -> Self {
        Self { number, body }
    }
}

/// Build a [`Object::Dictionary`] from key/value pairs.
pub fn dict(entries: Vec<(&str, Object)>) -> Object {
    Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Build a [`Object::Name`].
pub fn name(value: &str) -> Object {
    Object::Name(value.to_string())
}

/// Build a [`Object::Reference`].
pub fn reference(number: u32) -> Object {
    Object::Reference(ObjectRef::new(number))
}
