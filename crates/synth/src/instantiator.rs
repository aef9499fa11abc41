//! Recursive instantiator
//!
//! Builds one fully populated `FixtureValue` for a shape. Every
//! non-scalar shape is pushed on the visited path while it is expanded;
//! meeting it again below itself yields `Null`, which guarantees
//! termination on self-referential and mutually recursive shapes.

use crate::classifier::{classify, collection_len, TypeDescriptor};
use crate::scalars::member_fixture;
use crate::visited::VisitedShapes;
use shape_fixtures_common::{
    FixtureConfig, FixtureError, FixtureValue, Result, ShapeId, ShapeRegistry,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Deterministic fixture builder over a shape registry
pub struct Synthesizer<'a> {
    registry: &'a ShapeRegistry,
    config: &'a FixtureConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(registry: &'a ShapeRegistry, config: &'a FixtureConfig) -> Self {
        Self { registry, config }
    }

    /// Synthesize a fully populated instance of `root`
    ///
    /// Fails when the root shape is unknown or would be left absent.
    pub fn synthesize(&self, root: &ShapeId) -> Result<FixtureValue> {
        if !self.registry.contains(root) {
            return Err(FixtureError::UnknownShape(root.to_string()));
        }
        match classify(self.registry, self.config, root) {
            TypeDescriptor::Opaque | TypeDescriptor::Callback => {
                return Err(FixtureError::NotConstructible(root.to_string()));
            }
            TypeDescriptor::ConstantLike(values) if values.is_empty() => {
                return Err(FixtureError::NotConstructible(root.to_string()));
            }
            _ => {}
        }

        let mut visited = VisitedShapes::new();
        Ok(self.instantiate(&mut visited, root, None))
    }

    /// `member` is set when the value is assigned to a structure member,
    /// enabling named overrides
    fn instantiate(
        &self,
        visited: &mut VisitedShapes,
        id: &ShapeId,
        member: Option<&str>,
    ) -> FixtureValue {
        let descriptor = classify(self.registry, self.config, id);
        let tracked = descriptor.is_tracked();
        if tracked && !visited.push(id) {
            debug!(shape = %id, depth = visited.depth(), "cycle detected, leaving value absent");
            return FixtureValue::Null;
        }

        let value = match descriptor {
            TypeDescriptor::Scalar(kind) => member_fixture(self.config, member, kind),
            TypeDescriptor::ConstantLike(values) => match values.first() {
                Some(canonical) => FixtureValue::String(canonical.clone()),
                None => {
                    debug!(shape = %id, "enumeration without values");
                    FixtureValue::Null
                }
            },
            TypeDescriptor::Callback => FixtureValue::Null,
            TypeDescriptor::EmptyCollection { list: true } => FixtureValue::List(Vec::new()),
            TypeDescriptor::EmptyCollection { list: false } => FixtureValue::Map(BTreeMap::new()),
            TypeDescriptor::Sequence { element } => {
                let mut items = Vec::new();
                if !visited.contains(element) {
                    for _ in 0..collection_len(element) {
                        items.push(self.instantiate(visited, element, None));
                    }
                }
                FixtureValue::List(items)
            }
            TypeDescriptor::Mapping { value, .. } => {
                let mut entries = BTreeMap::new();
                if !visited.contains(value) {
                    for i in 0..collection_len(value) {
                        entries.insert(format!("key{}", i), self.instantiate(visited, value, None));
                    }
                }
                FixtureValue::Map(entries)
            }
            TypeDescriptor::Composite { members, .. } => {
                let mut fields = BTreeMap::new();
                for m in members.iter().filter(|m| m.settable) {
                    let field = self.instantiate(visited, &m.target, Some(&m.name));
                    fields.insert(m.name.clone(), field);
                }
                FixtureValue::Structure(fields)
            }
            TypeDescriptor::Opaque => {
                debug!(shape = %id, "no construction path, leaving value absent");
                FixtureValue::Null
            }
        };

        if tracked {
            visited.pop();
        }
        value
    }
}
