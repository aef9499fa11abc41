//! Smithy model file parser

use super::types::{Shape, SmithyModel};
use shape_fixtures_common::{FixtureError, Result, ShapeId, ShapeRegistry};
use std::fs;
use std::path::Path;

/// Input and output shapes of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationShapes {
    pub input: Option<ShapeId>,
    pub output: Option<ShapeId>,
}

/// Smithy model parser
///
/// Reads Smithy JSON AST files and lowers their data shapes into a
/// [`ShapeRegistry`].
pub struct SmithyParser {
    /// Loaded Smithy model
    model: SmithyModel,
}

impl SmithyParser {
    /// Load Smithy model from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SmithyParser::from_file("models/storage.json")?;
    /// let registry = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            FixtureError::Parse(format!(
                "Failed to read Smithy file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse Smithy model from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let model: SmithyModel = serde_json::from_str(json)
            .map_err(|e| FixtureError::Parse(format!("Failed to parse Smithy JSON: {}", e)))?;

        Ok(Self { model })
    }

    /// Lower the model into a shape registry
    pub fn parse(&self) -> Result<ShapeRegistry> {
        super::converter::convert_smithy_to_registry(&self.model)
    }

    /// Get reference to the underlying Smithy model
    pub fn model(&self) -> &SmithyModel {
        &self.model
    }

    /// Ids of every operation in the model
    pub fn operations(&self) -> Vec<ShapeId> {
        self.model
            .operation_ids()
            .into_iter()
            .map(ShapeId::new)
            .collect()
    }

    /// Input and output shape ids of `operation`
    pub fn operation_io(&self, operation: &str) -> Result<OperationShapes> {
        match self.model.get_shape(operation) {
            Some(Shape::Operation { input, output, .. }) => Ok(OperationShapes {
                input: input.as_ref().map(|r| ShapeId::new(r.target.as_str())),
                output: output.as_ref().map(|r| ShapeId::new(r.target.as_str())),
            }),
            Some(_) => Err(FixtureError::Parse(format!(
                "Shape {} is not an operation",
                operation
            ))),
            None => Err(FixtureError::UnknownShape(operation.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "smithy": "2.0",
        "shapes": {
            "com.example#Storage": {
                "type": "service",
                "version": "2024-01-01",
                "operations": [{ "target": "com.example#GetBucket" }]
            },
            "com.example#GetBucket": {
                "type": "operation",
                "input": { "target": "com.example#GetBucketRequest" },
                "output": { "target": "com.example#Bucket" }
            },
            "com.example#GetBucketRequest": {
                "type": "structure",
                "members": { "Name": { "target": "smithy.api#String" } }
            },
            "com.example#Bucket": {
                "type": "structure",
                "members": { "Name": { "target": "smithy.api#String" } }
            }
        }
    }"#;

    #[test]
    fn test_parse_minimal_smithy() {
        let parser = SmithyParser::from_json(MODEL).unwrap();
        assert_eq!(parser.model().smithy, "2.0");
        assert_eq!(parser.model().shapes.len(), 4);

        let registry = parser.parse().unwrap();
        assert!(registry.contains(&"com.example#Bucket".into()));
        assert!(!registry.contains(&"com.example#GetBucket".into()));
    }

    #[test]
    fn test_operation_io() {
        let parser = SmithyParser::from_json(MODEL).unwrap();
        assert_eq!(parser.operations(), vec![ShapeId::new("com.example#GetBucket")]);

        let io = parser.operation_io("com.example#GetBucket").unwrap();
        assert_eq!(io.input, Some(ShapeId::new("com.example#GetBucketRequest")));
        assert_eq!(io.output, Some(ShapeId::new("com.example#Bucket")));
    }

    #[test]
    fn test_operation_io_errors() {
        let parser = SmithyParser::from_json(MODEL).unwrap();
        assert!(matches!(
            parser.operation_io("com.example#Bucket"),
            Err(FixtureError::Parse(_))
        ));
        assert!(matches!(
            parser.operation_io("com.example#Missing"),
            Err(FixtureError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SmithyParser::from_json("{ not json"),
            Err(FixtureError::Parse(_))
        ));
    }
}
