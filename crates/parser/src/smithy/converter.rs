//! Converter from Smithy AST to the shape registry

use super::types::{traits, Member, Shape, SmithyModel, Traits};
use shape_fixtures_common::{
    MemberDef, Result, ScalarKind, ShapeId, ShapeKind, ShapeRegistry, StructureTraits,
};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// Lower every data shape of a Smithy model into a [`ShapeRegistry`]
///
/// The registry starts from the prelude, so member targets such as
/// `smithy.api#String` resolve without being declared in the model.
pub fn convert_smithy_to_registry(model: &SmithyModel) -> Result<ShapeRegistry> {
    let mut registry = ShapeRegistry::with_prelude();

    for (shape_id, shape) in &model.shapes {
        if let Some(kind) = convert_shape(shape) {
            trace!(shape = %shape_id, "registered smithy shape");
            registry.insert(shape_id.as_str(), kind);
        }
    }

    for (owner, target) in registry.dangling_references() {
        warn!(shape = %owner, target = %target, "shape references an undeclared target");
    }

    Ok(registry)
}

/// Map a single Smithy shape; service-level shapes yield `None`
fn convert_shape(shape: &Shape) -> Option<ShapeKind> {
    let scalar = |kind| Some(ShapeKind::scalar(kind));

    match shape {
        Shape::Service { .. } | Shape::Operation { .. } | Shape::Other => None,

        Shape::String { traits: shape_traits } => match enum_trait_values(shape_traits) {
            Some(values) => Some(ShapeKind::Enum { values }),
            None => scalar(ScalarKind::String),
        },
        Shape::Enum { members, .. } => Some(ShapeKind::Enum {
            values: enum_member_values(members),
        }),

        Shape::Integer { .. } | Shape::IntEnum { .. } => scalar(ScalarKind::Integer),
        Shape::Long { .. } => scalar(ScalarKind::Long),
        Shape::Float { .. } => scalar(ScalarKind::Float),
        Shape::Double { .. } => scalar(ScalarKind::Double),
        Shape::Boolean { .. } => scalar(ScalarKind::Boolean),
        Shape::Timestamp { .. } => scalar(ScalarKind::Timestamp),
        Shape::Blob { .. } => scalar(ScalarKind::Blob),
        Shape::Document { .. } => scalar(ScalarKind::Document),

        // No fixed fixture value is defined for these
        Shape::Byte { .. }
        | Shape::Short { .. }
        | Shape::BigInteger { .. }
        | Shape::BigDecimal { .. } => Some(ShapeKind::Unconstructible),

        Shape::List { member, .. } | Shape::Set { member, .. } => Some(ShapeKind::List {
            member: ShapeId::new(member.target.as_str()),
        }),
        Shape::Map { key, value, .. } => Some(ShapeKind::Map {
            key: ShapeId::new(key.target.as_str()),
            value: ShapeId::new(value.target.as_str()),
        }),

        Shape::Structure {
            members,
            traits: shape_traits,
        } => Some(ShapeKind::Structure {
            members: convert_members(members),
            traits: StructureTraits {
                error: shape_traits.contains_key(traits::ERROR),
                event_stream: false,
            },
        }),
        Shape::Union {
            members,
            traits: shape_traits,
        } => Some(ShapeKind::Structure {
            members: convert_members(members),
            traits: StructureTraits {
                error: false,
                event_stream: shape_traits.contains_key(traits::STREAMING),
            },
        }),
    }
}

fn convert_members(members: &BTreeMap<String, Member>) -> Vec<MemberDef> {
    members
        .iter()
        .map(|(name, member)| MemberDef::new(name.as_str(), member.target.as_str()))
        .collect()
}

/// Values of a Smithy 1.0 `smithy.api#enum` trait, in declaration order
fn enum_trait_values(shape_traits: &Traits) -> Option<Vec<String>> {
    let entries = shape_traits.get(traits::ENUM)?.as_array()?;
    let values: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.get("value")?.as_str().map(String::from))
        .collect();

    (!values.is_empty()).then_some(values)
}

/// Values of a Smithy 2.0 enum shape, ordered by member name
fn enum_member_values(members: &BTreeMap<String, Member>) -> Vec<String> {
    members
        .iter()
        .map(|(name, member)| {
            member
                .traits
                .get(traits::ENUM_VALUE)
                .and_then(|v| v.as_str())
                .unwrap_or(name.as_str())
                .to_string()
        })
        .collect()
}
