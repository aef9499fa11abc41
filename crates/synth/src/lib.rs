//! Deterministic object graph synthesis and validation
//!
//! Given a shape, the [`Synthesizer`] builds one fully populated fixture
//! value using fixed scalar values, and the [`Validator`] walks a value
//! and reports any field that differs from what synthesis would produce.
//! Together they support serialization round-trip tests without writing
//! fixtures by hand.
//!
//! ## Rules
//! - Scalars get a fixed value per kind; named overrides come first
//! - Collections get `1 + len(element id) % 5` entries, map keys `key0..`
//! - A shape already being expanded higher up the path is left absent
//! - Shapes without a construction path are left absent
//!
//! Shapes come from a [`ShapeRegistry`](shape_fixtures_common::ShapeRegistry)
//! filled by the Smithy loader or by [`Describe`] impls on Rust types.

mod classifier;
mod decode;
mod describe;
mod instantiator;
mod scalars;
mod typed;
mod validator;
mod visited;

pub use classifier::{classify, collection_len, TypeDescriptor};
pub use decode::decode;
pub use describe::{
    describe_constant, describe_structure, CanonicalValue, Describe, StructureBuilder,
};
pub use instantiator::Synthesizer;
pub use scalars::{
    fixture_document, fixture_for, fixture_timestamp, member_fixture, FIXTURE_BLOB,
    FIXTURE_EPOCH_SECONDS, FIXTURE_STRING,
};
pub use typed::{
    assert_fully_populated, synthesize, synthesize_with, validate, validate_all, validate_with,
};
pub use validator::{FailFast, FailureSink, Halt, ValidationFailure, ValidationReport, Validator};
pub use visited::VisitedShapes;
