//! Recursive validator
//!
//! Walks an existing `FixtureValue` and checks it against what the
//! synthesizer would have produced for the same shape. Traversal mirrors
//! the instantiator, including the visited path, so cycle-broken members
//! are accepted as absent.
//!
//! Failures are handed to a `FailureSink`. The sink decides whether
//! traversal halts at the first failure or carries on with siblings.

use crate::classifier::{classify, collection_len, TypeDescriptor};
use crate::scalars::member_fixture;
use crate::visited::VisitedShapes;
use shape_fixtures_common::{
    FixtureConfig, FixtureValue, MemberDef, ScalarKind, ShapeId, ShapeRegistry, StructureTraits,
};
use thiserror::Error;

static ABSENT: FixtureValue = FixtureValue::Null;

/// A field that does not hold its synthesized value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {path}: {message}")]
pub struct ValidationFailure {
    /// Field path, e.g. `Items[2].Name`; `$` is the root
    pub path: String,
    pub message: String,
}

/// Every failure found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{count} invalid value(s)", count = .failures.len())]
pub struct ValidationReport {
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.path.as_str()).collect()
    }
}

/// Returned by a sink to stop traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt;

type Flow = std::result::Result<(), Halt>;

/// Receives validation failures
#[cfg_attr(test, mockall::automock)]
pub trait FailureSink {
    /// Record a failure; `Err(Halt)` stops the walk
    fn record(&mut self, failure: ValidationFailure) -> Result<(), Halt>;
}

/// Keeps the first failure and halts
#[derive(Debug, Default)]
pub struct FailFast {
    pub first: Option<ValidationFailure>,
}

impl FailureSink for FailFast {
    fn record(&mut self, failure: ValidationFailure) -> Result<(), Halt> {
        self.first.get_or_insert(failure);
        Err(Halt)
    }
}

impl FailureSink for ValidationReport {
    fn record(&mut self, failure: ValidationFailure) -> Result<(), Halt> {
        self.failures.push(failure);
        Ok(())
    }
}

fn fail(sink: &mut dyn FailureSink, path: &str, message: String) -> Flow {
    let path = if path.is_empty() { "$" } else { path };
    sink.record(ValidationFailure {
        path: path.to_string(),
        message,
    })
}

fn child_path(parent: &str, member: &str) -> String {
    if parent.is_empty() {
        member.to_string()
    } else {
        format!("{}.{}", parent, member)
    }
}

fn render(value: &FixtureValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.kind_name().to_string())
}

fn is_http_status(code: i32) -> bool {
    (100..=599).contains(&code)
}

/// Checks values against the synthesis rules of a registry
pub struct Validator<'a> {
    registry: &'a ShapeRegistry,
    config: &'a FixtureConfig,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a ShapeRegistry, config: &'a FixtureConfig) -> Self {
        Self { registry, config }
    }

    /// Validate and return the first failure
    pub fn validate(&self, root: &ShapeId, value: &FixtureValue) -> Result<(), ValidationFailure> {
        let mut sink = FailFast::default();
        self.validate_into(root, value, &mut sink);
        match sink.first {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Validate and collect every failure
    pub fn validate_all(&self, root: &ShapeId, value: &FixtureValue) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.validate_into(root, value, &mut report);
        report
    }

    /// Validate, reporting failures to `sink`
    pub fn validate_into(&self, root: &ShapeId, value: &FixtureValue, sink: &mut dyn FailureSink) {
        if value.is_null() {
            let _ = fail(sink, "", "Root object null".to_string());
            return;
        }
        let mut visited = VisitedShapes::new();
        let _ = self.check(&mut visited, sink, root, value, "", None);
    }

    fn check(
        &self,
        visited: &mut VisitedShapes,
        sink: &mut dyn FailureSink,
        id: &ShapeId,
        value: &FixtureValue,
        path: &str,
        member: Option<&str>,
    ) -> Flow {
        let descriptor = classify(self.registry, self.config, id);
        let tracked = descriptor.is_tracked();
        if tracked && !visited.push(id) {
            // Shape is an ancestor: synthesis left this absent
            return Ok(());
        }

        let flow = self.check_descriptor(visited, sink, descriptor, value, path, member);

        if tracked {
            visited.pop();
        }
        flow
    }

    fn check_descriptor(
        &self,
        visited: &mut VisitedShapes,
        sink: &mut dyn FailureSink,
        descriptor: TypeDescriptor<'_>,
        value: &FixtureValue,
        path: &str,
        member: Option<&str>,
    ) -> Flow {
        match descriptor {
            TypeDescriptor::Scalar(kind) => self.check_scalar(sink, kind, value, path, member),
            TypeDescriptor::ConstantLike(_) => match value {
                FixtureValue::String(_) => Ok(()),
                other => fail(
                    sink,
                    path,
                    format!("expected a constant value, found {}", other.kind_name()),
                ),
            },
            TypeDescriptor::Callback => {
                if value.is_null() {
                    Ok(())
                } else {
                    fail(
                        sink,
                        path,
                        format!("callback must be absent, found {}", value.kind_name()),
                    )
                }
            }
            TypeDescriptor::EmptyCollection { .. } => match value.entry_count() {
                Some(0) => Ok(()),
                Some(n) => fail(
                    sink,
                    path,
                    format!("expected an empty collection, found {} entries", n),
                ),
                None => fail(
                    sink,
                    path,
                    format!("expected an empty collection, found {}", value.kind_name()),
                ),
            },
            TypeDescriptor::Sequence { element } => {
                let FixtureValue::List(items) = value else {
                    return fail(sink, path, format!("expected list, found {}", value.kind_name()));
                };
                let expected = self.expected_len(visited, element);
                if items.len() != expected {
                    fail(
                        sink,
                        path,
                        format!("expected {} elements, found {}", expected, items.len()),
                    )?;
                }
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    self.check(visited, sink, element, item, &item_path, None)?;
                }
                Ok(())
            }
            TypeDescriptor::Mapping { value: value_shape, .. } => {
                let FixtureValue::Map(entries) = value else {
                    return fail(sink, path, format!("expected map, found {}", value.kind_name()));
                };
                let expected = self.expected_len(visited, value_shape);
                let keys_match = entries.len() == expected
                    && (0..expected).all(|i| entries.contains_key(&format!("key{}", i)));
                if !keys_match {
                    let found: Vec<&str> = entries.keys().map(String::as_str).collect();
                    fail(
                        sink,
                        path,
                        format!(
                            "expected keys key0..key{}, found {:?}",
                            expected.saturating_sub(1),
                            found
                        ),
                    )?;
                }
                for (key, entry) in entries {
                    let entry_path = format!("{}[{}]", path, key);
                    self.check(visited, sink, value_shape, entry, &entry_path, None)?;
                }
                Ok(())
            }
            TypeDescriptor::Composite { members, traits } => {
                let FixtureValue::Structure(fields) = value else {
                    return fail(
                        sink,
                        path,
                        format!("expected structure, found {}", value.kind_name()),
                    );
                };
                for m in members {
                    if !m.settable || self.is_excluded(m, traits) {
                        continue;
                    }
                    let field = fields.get(&m.name).unwrap_or(&ABSENT);
                    let field_path = child_path(path, &m.name);
                    if let Some(flow) = self.check_status(sink, m, field, &field_path) {
                        flow?;
                        continue;
                    }
                    self.check(visited, sink, &m.target, field, &field_path, Some(&m.name))?;
                }
                Ok(())
            }
            TypeDescriptor::Opaque => Ok(()),
        }
    }

    fn check_scalar(
        &self,
        sink: &mut dyn FailureSink,
        kind: ScalarKind,
        value: &FixtureValue,
        path: &str,
        member: Option<&str>,
    ) -> Flow {
        let expected = member_fixture(self.config, member, kind);
        if std::mem::discriminant(value) != std::mem::discriminant(&expected) {
            return fail(sink, path, format!("expected {}, found {}", kind, value.kind_name()));
        }
        if let FixtureValue::Blob(blob) = value {
            if blob.is_empty() {
                return fail(sink, path, "blob is empty".to_string());
            }
        }
        if *value != expected {
            return fail(
                sink,
                path,
                format!("expected {}, found {}", render(&expected), render(value)),
            );
        }
        Ok(())
    }

    /// Status members may hold an HTTP status set outside synthesis
    fn check_status(
        &self,
        sink: &mut dyn FailureSink,
        member: &MemberDef,
        value: &FixtureValue,
        path: &str,
    ) -> Option<Flow> {
        if !self.config.is_status_member(&member.name) {
            return None;
        }
        let descriptor = classify(self.registry, self.config, &member.target);
        match (descriptor, value) {
            (TypeDescriptor::Scalar(ScalarKind::Integer), FixtureValue::Integer(code))
                if is_http_status(*code) =>
            {
                if *code == self.config.status_value {
                    Some(Ok(()))
                } else {
                    Some(fail(
                        sink,
                        path,
                        format!("expected status {}, found {}", self.config.status_value, code),
                    ))
                }
            }
            _ => None,
        }
    }

    fn is_excluded(&self, member: &MemberDef, traits: StructureTraits) -> bool {
        self.config.is_skipped(&member.name)
            || (traits.error && self.config.is_error_metadata(&member.name))
            || (traits.event_stream && self.config.is_event_stream_member(&member.name))
    }

    fn expected_len(&self, visited: &VisitedShapes, element: &ShapeId) -> usize {
        if visited.contains(element) {
            0
        } else {
            collection_len(element)
        }
    }
}
