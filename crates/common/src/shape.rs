//! Shape intermediate representation
//!
//! A `ShapeRegistry` maps absolute shape ids (`namespace#Name`) to the
//! kind of data each shape holds. Both typed Rust values and Smithy
//! models are lowered into this form before fixtures are synthesized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Absolute shape identifier, e.g. `com.example.storage#Bucket`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shape name without the namespace
    /// e.g., "com.example#Bucket" -> "Bucket"
    pub fn name(&self) -> &str {
        match self.0.rfind('#') {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Namespace part, if the id is absolute
    pub fn namespace(&self) -> Option<&str> {
        self.0.rfind('#').map(|pos| &self.0[..pos])
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Primitive value kinds that receive a fixed fixture value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Boolean,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// Single-precision float
    Float,
    Double,
    Timestamp,
    /// Byte stream
    Blob,
    /// Open JSON document
    Document,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Blob => "blob",
            ScalarKind::Document => "document",
        };
        f.write_str(name)
    }
}

/// Flags on structure shapes that change which members are validated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureTraits {
    /// Structure models a service error
    #[serde(default)]
    pub error: bool,

    /// Structure models an event stream payload
    #[serde(default)]
    pub event_stream: bool,
}

/// Member of a structure shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDef {
    /// Member name as it appears in serialized form
    pub name: String,

    /// Target shape
    pub target: ShapeId,

    /// Whether the member can be assigned; read-only members are skipped
    #[serde(default = "default_settable")]
    pub settable: bool,
}

fn default_settable() -> bool {
    true
}

impl MemberDef {
    pub fn new(name: impl Into<String>, target: impl Into<ShapeId>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            settable: true,
        }
    }

    pub fn read_only(name: impl Into<String>, target: impl Into<ShapeId>) -> Self {
        Self {
            settable: false,
            ..Self::new(name, target)
        }
    }
}

/// What a registered shape holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Scalar { kind: ScalarKind },

    /// Open string-backed enumeration; the first value is canonical
    Enum { values: Vec<String> },

    /// Event-handler style member type that is never populated
    Callback,

    List { member: ShapeId },

    /// Map keys are always strings
    Map { key: ShapeId, value: ShapeId },

    Structure {
        members: Vec<MemberDef>,
        #[serde(default)]
        traits: StructureTraits,
    },

    /// No zero-argument construction path
    Unconstructible,
}

impl ShapeKind {
    pub fn scalar(kind: ScalarKind) -> Self {
        ShapeKind::Scalar { kind }
    }

    pub fn structure(members: Vec<MemberDef>) -> Self {
        ShapeKind::Structure {
            members,
            traits: StructureTraits::default(),
        }
    }
}

/// Well-known scalar shapes every registry can resolve
pub mod prelude {
    use super::{ScalarKind, ShapeKind};

    pub const STRING: &str = "smithy.api#String";
    pub const BOOLEAN: &str = "smithy.api#Boolean";
    pub const PRIMITIVE_BOOLEAN: &str = "smithy.api#PrimitiveBoolean";
    pub const INTEGER: &str = "smithy.api#Integer";
    pub const PRIMITIVE_INTEGER: &str = "smithy.api#PrimitiveInteger";
    pub const LONG: &str = "smithy.api#Long";
    pub const PRIMITIVE_LONG: &str = "smithy.api#PrimitiveLong";
    pub const FLOAT: &str = "smithy.api#Float";
    pub const PRIMITIVE_FLOAT: &str = "smithy.api#PrimitiveFloat";
    pub const DOUBLE: &str = "smithy.api#Double";
    pub const PRIMITIVE_DOUBLE: &str = "smithy.api#PrimitiveDouble";
    pub const TIMESTAMP: &str = "smithy.api#Timestamp";
    pub const BLOB: &str = "smithy.api#Blob";
    pub const DOCUMENT: &str = "smithy.api#Document";
    pub const UNIT: &str = "smithy.api#Unit";

    /// Prelude shapes in registration order
    pub fn shapes() -> Vec<(&'static str, ShapeKind)> {
        let scalar = ShapeKind::scalar;
        vec![
            (STRING, scalar(ScalarKind::String)),
            (BOOLEAN, scalar(ScalarKind::Boolean)),
            (PRIMITIVE_BOOLEAN, scalar(ScalarKind::Boolean)),
            (INTEGER, scalar(ScalarKind::Integer)),
            (PRIMITIVE_INTEGER, scalar(ScalarKind::Integer)),
            (LONG, scalar(ScalarKind::Long)),
            (PRIMITIVE_LONG, scalar(ScalarKind::Long)),
            (FLOAT, scalar(ScalarKind::Float)),
            (PRIMITIVE_FLOAT, scalar(ScalarKind::Float)),
            (DOUBLE, scalar(ScalarKind::Double)),
            (PRIMITIVE_DOUBLE, scalar(ScalarKind::Double)),
            (TIMESTAMP, scalar(ScalarKind::Timestamp)),
            (BLOB, scalar(ScalarKind::Blob)),
            (DOCUMENT, scalar(ScalarKind::Document)),
            (UNIT, ShapeKind::structure(Vec::new())),
        ]
    }
}

/// Registry of shapes keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeRegistry {
    shapes: BTreeMap<ShapeId, ShapeKind>,
}

impl ShapeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the prelude scalar shapes
    pub fn with_prelude() -> Self {
        let mut registry = Self::new();
        for (id, kind) in prelude::shapes() {
            registry.insert(id, kind);
        }
        registry
    }

    /// Register a shape, returning the kind it replaced
    pub fn insert(&mut self, id: impl Into<ShapeId>, kind: ShapeKind) -> Option<ShapeKind> {
        self.shapes.insert(id.into(), kind)
    }

    pub fn get(&self, id: &ShapeId) -> Option<&ShapeKind> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in id order
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &ShapeKind)> {
        self.shapes.iter()
    }

    /// Ids of shapes whose target was never registered
    pub fn dangling_references(&self) -> Vec<(&ShapeId, &ShapeId)> {
        let mut dangling = Vec::new();
        for (id, kind) in &self.shapes {
            let targets: Vec<&ShapeId> = match kind {
                ShapeKind::List { member } => vec![member],
                ShapeKind::Map { key, value } => vec![key, value],
                ShapeKind::Structure { members, .. } => members.iter().map(|m| &m.target).collect(),
                _ => Vec::new(),
            };
            for target in targets {
                if !self.shapes.contains_key(target) {
                    dangling.push((id, target));
                }
            }
        }
        dangling
    }
}
