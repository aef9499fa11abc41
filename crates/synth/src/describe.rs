//! Shape descriptions for Rust types
//!
//! Rust has no runtime reflection, so types opt in by implementing
//! [`Describe`], which registers the type's shape in a [`ShapeRegistry`].
//! Member names must match the names the type uses when serialized.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use shape_fixtures_common::{ShapeId, ShapeRegistry, StructureTraits};
//! use shape_fixtures_synth::{describe_structure, Describe};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Bucket {
//!     name: String,
//!     versioned: bool,
//! }
//!
//! impl Describe for Bucket {
//!     fn describe(registry: &mut ShapeRegistry) -> ShapeId {
//!         describe_structure(registry, "example#Bucket", StructureTraits::default(), |s| {
//!             s.member::<String>("Name").member::<bool>("Versioned");
//!         })
//!     }
//! }
//!
//! let bucket: Bucket = shape_fixtures_synth::synthesize().unwrap();
//! assert!(bucket.versioned);
//! ```

use chrono::{DateTime, Utc};
use shape_fixtures_common::{
    prelude, Blob, MemberDef, ScalarKind, ShapeId, ShapeKind, ShapeRegistry, StructureTraits,
};
use std::collections::{BTreeMap, HashMap};

/// Types whose shape can be registered for synthesis and validation
pub trait Describe {
    /// Register the shape of `Self` and every shape it references,
    /// returning the id of `Self`
    fn describe(registry: &mut ShapeRegistry) -> ShapeId;
}

/// Open enumerations expose their canonical value explicitly
pub trait CanonicalValue {
    /// Shape id of the enumeration
    const SHAPE_ID: &'static str;

    /// Value used whenever a fixture of this type is synthesized
    fn canonical_value() -> &'static str;
}

/// Register an open enumeration described by [`CanonicalValue`]
pub fn describe_constant<T: CanonicalValue>(registry: &mut ShapeRegistry) -> ShapeId {
    let id = ShapeId::new(T::SHAPE_ID);
    registry.insert(
        id.clone(),
        ShapeKind::Enum {
            values: vec![T::canonical_value().to_string()],
        },
    );
    id
}

/// Collects the members of a structure being described
pub struct StructureBuilder<'r> {
    registry: &'r mut ShapeRegistry,
    members: Vec<MemberDef>,
}

impl StructureBuilder<'_> {
    /// Settable member of type `T`
    pub fn member<T: Describe>(&mut self, name: &str) -> &mut Self {
        let target = T::describe(self.registry);
        self.members.push(MemberDef::new(name, target));
        self
    }

    /// Member that is never assigned or validated
    pub fn read_only<T: Describe>(&mut self, name: &str) -> &mut Self {
        let target = T::describe(self.registry);
        self.members.push(MemberDef::read_only(name, target));
        self
    }

    /// Event-handler member; stays absent
    pub fn callback(&mut self, name: &str, shape: &str) -> &mut Self {
        self.registry.insert(shape, ShapeKind::Callback);
        self.members.push(MemberDef::new(name, shape));
        self
    }

    /// Member whose type has no construction path; stays absent
    pub fn opaque(&mut self, name: &str, shape: &str) -> &mut Self {
        self.registry.insert(shape, ShapeKind::Unconstructible);
        self.members.push(MemberDef::new(name, shape));
        self
    }
}

/// Register a structure shape
///
/// A placeholder is registered before `build` runs, so members that refer
/// back to the structure resolve to its id instead of recursing.
pub fn describe_structure(
    registry: &mut ShapeRegistry,
    id: &str,
    traits: StructureTraits,
    build: impl FnOnce(&mut StructureBuilder<'_>),
) -> ShapeId {
    let id = ShapeId::new(id);
    if registry.contains(&id) {
        return id;
    }
    registry.insert(id.clone(), ShapeKind::Structure {
        members: Vec::new(),
        traits,
    });

    let members = {
        let mut builder = StructureBuilder {
            registry: &mut *registry,
            members: Vec::new(),
        };
        build(&mut builder);
        builder.members
    };

    registry.insert(id.clone(), ShapeKind::Structure { members, traits });
    id
}

fn describe_scalar(registry: &mut ShapeRegistry, id: &str, kind: ScalarKind) -> ShapeId {
    let id = ShapeId::new(id);
    if !registry.contains(&id) {
        registry.insert(id.clone(), ShapeKind::scalar(kind));
    }
    id
}

macro_rules! describe_scalars {
    ($($ty:ty => $id:expr, $kind:expr;)*) => {
        $(
            impl Describe for $ty {
                fn describe(registry: &mut ShapeRegistry) -> ShapeId {
                    describe_scalar(registry, $id, $kind)
                }
            }
        )*
    };
}

describe_scalars! {
    String => prelude::STRING, ScalarKind::String;
    bool => prelude::BOOLEAN, ScalarKind::Boolean;
    i32 => prelude::INTEGER, ScalarKind::Integer;
    i64 => prelude::LONG, ScalarKind::Long;
    f32 => prelude::FLOAT, ScalarKind::Float;
    f64 => prelude::DOUBLE, ScalarKind::Double;
    DateTime<Utc> => prelude::TIMESTAMP, ScalarKind::Timestamp;
    Blob => prelude::BLOB, ScalarKind::Blob;
    serde_json::Value => prelude::DOCUMENT, ScalarKind::Document;
}

// Absent values serialize as null, so Option is described as its inner type
impl<T: Describe> Describe for Option<T> {
    fn describe(registry: &mut ShapeRegistry) -> ShapeId {
        T::describe(registry)
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe(registry: &mut ShapeRegistry) -> ShapeId {
        T::describe(registry)
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(registry: &mut ShapeRegistry) -> ShapeId {
        let member = T::describe(registry);
        let id = ShapeId::new(format!("rust#Vec<{}>", member));
        registry.insert(id.clone(), ShapeKind::List { member });
        id
    }
}

fn describe_map<V: Describe>(registry: &mut ShapeRegistry, container: &str) -> ShapeId {
    let key = String::describe(registry);
    let value = V::describe(registry);
    let id = ShapeId::new(format!("rust#{}<{}>", container, value));
    registry.insert(id.clone(), ShapeKind::Map { key, value });
    id
}

impl<V: Describe> Describe for HashMap<String, V> {
    fn describe(registry: &mut ShapeRegistry) -> ShapeId {
        describe_map::<V>(registry, "HashMap")
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe(registry: &mut ShapeRegistry) -> ShapeId {
        describe_map::<V>(registry, "BTreeMap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node;

    impl Describe for Node {
        fn describe(registry: &mut ShapeRegistry) -> ShapeId {
            describe_structure(registry, "example#Node", StructureTraits::default(), |s| {
                s.member::<Option<Box<Node>>>("Self")
                    .member::<String>("Label")
                    .member::<Vec<Node>>("Children");
            })
        }
    }

    struct Region;

    impl CanonicalValue for Region {
        const SHAPE_ID: &'static str = "example#Region";

        fn canonical_value() -> &'static str {
            "us-east-1"
        }
    }

    #[test]
    fn test_scalars_register_prelude_shapes() {
        let mut registry = ShapeRegistry::new();
        let id = <Option<i64>>::describe(&mut registry);
        assert_eq!(id.as_str(), prelude::LONG);
        assert_eq!(registry.get(&id), Some(&ShapeKind::scalar(ScalarKind::Long)));
    }

    #[test]
    fn test_recursive_structure_terminates() {
        let mut registry = ShapeRegistry::with_prelude();
        let id = Node::describe(&mut registry);

        let Some(ShapeKind::Structure { members, .. }) = registry.get(&id) else {
            panic!("expected structure");
        };
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Self", "Label", "Children"]);
        assert_eq!(members[0].target, id);
        assert_eq!(
            registry.get(&members[2].target),
            Some(&ShapeKind::List { member: id.clone() })
        );
        assert!(registry.dangling_references().is_empty());
    }

    #[test]
    fn test_maps_use_string_keys() {
        let mut registry = ShapeRegistry::new();
        let id = <HashMap<String, f64>>::describe(&mut registry);
        assert_eq!(
            registry.get(&id),
            Some(&ShapeKind::Map {
                key: prelude::STRING.into(),
                value: prelude::DOUBLE.into(),
            })
        );
    }

    #[test]
    fn test_describe_constant() {
        let mut registry = ShapeRegistry::new();
        let id = describe_constant::<Region>(&mut registry);
        assert_eq!(
            registry.get(&id),
            Some(&ShapeKind::Enum {
                values: vec!["us-east-1".to_string()]
            })
        );
    }
}
