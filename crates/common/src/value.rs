//! Dynamic fixture values
//!
//! `FixtureValue` is the object graph the synthesizer builds and the
//! validator walks. It serializes to the same JSON a typed Rust value of
//! the same shape would produce, so it can be handed to serde to obtain
//! the typed value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// In-memory seekable byte stream
#[derive(Debug, Clone, Default)]
pub struct Blob(Cursor<Vec<u8>>);

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Cursor::new(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.get_ref()
    }

    pub fn len(&self) -> usize {
        self.0.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.get_ref().is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0.into_inner()
    }
}

// Read position is not part of the value.
impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Blob {}

impl Read for Blob {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for Blob {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<u8>::deserialize(deserializer).map(Blob::new)
    }
}

/// A node in a synthesized object graph
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    /// Absent value (cycle broken, opaque shape, callback)
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Timestamp(DateTime<Utc>),
    Blob(Blob),
    Document(serde_json::Value),
    List(Vec<FixtureValue>),
    Map(BTreeMap<String, FixtureValue>),
    Structure(BTreeMap<String, FixtureValue>),
    /// JSON that did not fit the declared shape while decoding
    Unrecognized(serde_json::Value),
}

impl FixtureValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FixtureValue::Null)
    }

    /// Short name of the variant for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FixtureValue::Null => "null",
            FixtureValue::String(_) => "string",
            FixtureValue::Boolean(_) => "boolean",
            FixtureValue::Integer(_) => "integer",
            FixtureValue::Long(_) => "long",
            FixtureValue::Float(_) => "float",
            FixtureValue::Double(_) => "double",
            FixtureValue::Timestamp(_) => "timestamp",
            FixtureValue::Blob(_) => "blob",
            FixtureValue::Document(_) => "document",
            FixtureValue::List(_) => "list",
            FixtureValue::Map(_) => "map",
            FixtureValue::Structure(_) => "structure",
            FixtureValue::Unrecognized(_) => "unrecognized",
        }
    }

    /// Number of entries for container values
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            FixtureValue::List(items) => Some(items.len()),
            FixtureValue::Map(entries) | FixtureValue::Structure(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Look up a structure member
    pub fn member(&self, name: &str) -> Option<&FixtureValue> {
        match self {
            FixtureValue::Structure(members) => members.get(name),
            _ => None,
        }
    }

    /// Mutable access to a structure member
    pub fn member_mut(&mut self, name: &str) -> Option<&mut FixtureValue> {
        match self {
            FixtureValue::Structure(members) => members.get_mut(name),
            _ => None,
        }
    }

    /// Render as a JSON value
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for FixtureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FixtureValue::Null => serializer.serialize_none(),
            FixtureValue::String(s) => serializer.serialize_str(s),
            FixtureValue::Boolean(b) => serializer.serialize_bool(*b),
            FixtureValue::Integer(i) => serializer.serialize_i32(*i),
            FixtureValue::Long(l) => serializer.serialize_i64(*l),
            FixtureValue::Float(f) => serializer.serialize_f32(*f),
            FixtureValue::Double(d) => serializer.serialize_f64(*d),
            FixtureValue::Timestamp(ts) => ts.serialize(serializer),
            FixtureValue::Blob(blob) => blob.serialize(serializer),
            FixtureValue::Document(doc) | FixtureValue::Unrecognized(doc) => {
                doc.serialize(serializer)
            }
            FixtureValue::List(items) => serializer.collect_seq(items),
            FixtureValue::Map(entries) | FixtureValue::Structure(entries) => {
                serializer.collect_map(entries)
            }
        }
    }
}
