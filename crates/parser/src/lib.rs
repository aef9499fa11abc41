//! Model loading for shape fixtures
//!
//! Turns service model documents into the shape registry that the
//! synthesizer and validator operate on. Smithy JSON AST is the
//! supported format.

pub mod smithy;

pub use smithy::{OperationShapes, SmithyParser};

use shape_fixtures_common::{Result, ShapeRegistry};
use std::path::Path;

/// Load a Smithy JSON AST file into a shape registry
pub fn load_smithy_model<P: AsRef<Path>>(path: P) -> Result<ShapeRegistry> {
    SmithyParser::from_file(path)?.parse()
}
