//! Smithy model loader
//!
//! Parses Smithy JSON AST documents into a [`ShapeRegistry`](shape_fixtures_common::ShapeRegistry).
//!
//! ## Format
//! Smithy JSON AST contains:
//! - Service and operation shapes, which are not data and are skipped
//! - Data shapes (structures, unions, lists, maps, scalars, enums)
//! - Traits; `error` and `streaming` mark structures the validator treats specially
//!
//! ## Usage
//! ```rust,ignore
//! use shape_fixtures_parser::smithy::SmithyParser;
//!
//! let parser = SmithyParser::from_file("models/storage.json")?;
//! let registry = parser.parse()?;
//! let io = parser.operation_io("com.example#GetBucket")?;
//! ```

mod converter;
mod parser;
mod types;

pub use converter::convert_smithy_to_registry;
pub use parser::{OperationShapes, SmithyParser};
pub use types::*;
