//! Type classification
//!
//! Decides which category a shape falls into. Synthesis, validation and
//! JSON decoding all dispatch on the same descriptor.

use shape_fixtures_common::{
    FixtureConfig, MemberDef, ScalarKind, ShapeId, ShapeKind, ShapeRegistry, StructureTraits,
};
use tracing::trace;

/// Category of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeDescriptor<'a> {
    Scalar(ScalarKind),

    /// Open enumeration; values are the declared constants
    ConstantLike(&'a [String]),

    /// Never populated
    Callback,

    /// Named shape constructed empty
    EmptyCollection { list: bool },

    Sequence { element: &'a ShapeId },

    Mapping { key: &'a ShapeId, value: &'a ShapeId },

    Composite {
        members: &'a [MemberDef],
        traits: StructureTraits,
    },

    /// No construction path
    Opaque,
}

impl TypeDescriptor<'_> {
    /// Whether the shape takes part in cycle tracking
    pub fn is_tracked(&self) -> bool {
        !matches!(self, TypeDescriptor::Scalar(_))
    }

    /// Category name for listings and diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            TypeDescriptor::Scalar(_) => "scalar",
            TypeDescriptor::ConstantLike(_) => "constant",
            TypeDescriptor::Callback => "callback",
            TypeDescriptor::EmptyCollection { .. } => "empty-collection",
            TypeDescriptor::Sequence { .. } => "sequence",
            TypeDescriptor::Mapping { .. } => "mapping",
            TypeDescriptor::Composite { .. } => "composite",
            TypeDescriptor::Opaque => "opaque",
        }
    }
}

/// Classify a shape; unknown ids are opaque
pub fn classify<'a>(
    registry: &'a ShapeRegistry,
    config: &FixtureConfig,
    id: &ShapeId,
) -> TypeDescriptor<'a> {
    let Some(kind) = registry.get(id) else {
        trace!(shape = %id, "unregistered shape classified as opaque");
        return TypeDescriptor::Opaque;
    };

    let descriptor = match kind {
        ShapeKind::Scalar { kind } => TypeDescriptor::Scalar(*kind),
        ShapeKind::Enum { values } => TypeDescriptor::ConstantLike(values),
        ShapeKind::Callback => TypeDescriptor::Callback,
        _ if config.is_empty_collection(id) => TypeDescriptor::EmptyCollection {
            list: matches!(kind, ShapeKind::List { .. }),
        },
        ShapeKind::List { member } => TypeDescriptor::Sequence { element: member },
        ShapeKind::Map { key, value } => TypeDescriptor::Mapping { key, value },
        ShapeKind::Structure { members, traits } => TypeDescriptor::Composite {
            members,
            traits: *traits,
        },
        ShapeKind::Unconstructible => TypeDescriptor::Opaque,
    };

    trace!(shape = %id, category = descriptor.category(), "classified shape");
    descriptor
}

/// Number of entries synthesized for a collection of `element`
///
/// Varies with the element id so different collections get different
/// lengths, always in 1..=5.
pub fn collection_len(element: &ShapeId) -> usize {
    1 + element.as_str().len() % 5
}
