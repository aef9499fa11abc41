//! Common types and utilities for shape-fixtures
//!
//! This crate contains the shape intermediate representation, the dynamic
//! fixture value graph, the override table and the error types shared by
//! the synthesizer, the Smithy loader and the CLI.

mod config;
mod shape;
mod value;

pub use config::{FixtureConfig, MemberOverride, OverrideLiteral};
pub use shape::{prelude, MemberDef, ScalarKind, ShapeId, ShapeKind, ShapeRegistry, StructureTraits};
pub use value::{Blob, FixtureValue};

use thiserror::Error;

/// Errors that can occur while building or converting fixtures
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Shape {0} has no construction path")]
    NotConstructible(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;
