//! Smithy JSON AST type definitions
//!
//! These types represent the structure of Smithy JSON files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Root Smithy model document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmithyModel {
    /// Smithy version (e.g., "2.0")
    pub smithy: String,

    /// Shape definitions (operations, structures, services, etc.)
    #[serde(default)]
    pub shapes: BTreeMap<String, Shape>,

    /// Metadata about the model
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Trait map attached to shapes and members
pub type Traits = HashMap<String, serde_json::Value>;

/// A Smithy shape (can be service, operation, structure, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Service definition
    Service {
        /// API version
        #[serde(default)]
        version: Option<String>,

        /// Operations exposed by this service
        #[serde(default)]
        operations: Vec<ShapeReference>,

        #[serde(default)]
        traits: Traits,
    },

    /// Operation definition
    Operation {
        /// Input shape
        #[serde(default)]
        input: Option<ShapeReference>,

        /// Output shape
        #[serde(default)]
        output: Option<ShapeReference>,

        /// Error shapes
        #[serde(default)]
        errors: Vec<ShapeReference>,

        #[serde(default)]
        traits: Traits,
    },

    /// Structure definition (input/output types)
    Structure {
        #[serde(default)]
        members: BTreeMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    /// Tagged union; event streams are unions with the streaming trait
    Union {
        #[serde(default)]
        members: BTreeMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    String {
        #[serde(default)]
        traits: Traits,
    },

    /// Smithy 2.0 enum shape
    Enum {
        #[serde(default)]
        members: BTreeMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    #[serde(rename = "intEnum")]
    IntEnum {
        #[serde(default)]
        traits: Traits,
    },

    Integer {
        #[serde(default)]
        traits: Traits,
    },

    Long {
        #[serde(default)]
        traits: Traits,
    },

    Float {
        #[serde(default)]
        traits: Traits,
    },

    Double {
        #[serde(default)]
        traits: Traits,
    },

    Boolean {
        #[serde(default)]
        traits: Traits,
    },

    Timestamp {
        #[serde(default)]
        traits: Traits,
    },

    Blob {
        #[serde(default)]
        traits: Traits,
    },

    Document {
        #[serde(default)]
        traits: Traits,
    },

    Byte {
        #[serde(default)]
        traits: Traits,
    },

    Short {
        #[serde(default)]
        traits: Traits,
    },

    #[serde(rename = "bigInteger")]
    BigInteger {
        #[serde(default)]
        traits: Traits,
    },

    #[serde(rename = "bigDecimal")]
    BigDecimal {
        #[serde(default)]
        traits: Traits,
    },

    List {
        /// Member type
        member: ShapeReference,

        #[serde(default)]
        traits: Traits,
    },

    /// Smithy 1.0 set; treated as a list
    Set {
        member: ShapeReference,

        #[serde(default)]
        traits: Traits,
    },

    Map {
        key: ShapeReference,

        value: ShapeReference,

        #[serde(default)]
        traits: Traits,
    },

    /// Fallback for other shape types (resources, mixins)
    #[serde(other)]
    Other,
}

/// Reference to another shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeReference {
    /// Target shape ID (e.g., "com.amazonaws.s3#Bucket")
    pub target: String,
}

/// Structure member definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Target shape for this member
    pub target: String,

    #[serde(default)]
    pub traits: Traits,
}

impl SmithyModel {
    /// Find the service shape in the model
    pub fn find_service(&self) -> Option<(&String, &Shape)> {
        self.shapes
            .iter()
            .find(|(_, shape)| matches!(shape, Shape::Service { .. }))
    }

    /// Get a shape by its ID
    pub fn get_shape(&self, shape_id: &str) -> Option<&Shape> {
        self.shapes.get(shape_id)
    }

    /// Ids of all operation shapes
    pub fn operation_ids(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter(|(_, shape)| matches!(shape, Shape::Operation { .. }))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Common Smithy trait names
pub mod traits {
    pub const DOCUMENTATION: &str = "smithy.api#documentation";
    pub const ENUM: &str = "smithy.api#enum";
    pub const ENUM_VALUE: &str = "smithy.api#enumValue";
    pub const ERROR: &str = "smithy.api#error";
    pub const STREAMING: &str = "smithy.api#streaming";
}
