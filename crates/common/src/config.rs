//! Fixture override table
//!
//! Named-member overrides, empty-collection shapes and validation
//! exclusions. The defaults reproduce the conventions of the AWS SDK
//! vocabulary; other APIs can load their own table from YAML.

use crate::{FixtureError, FixtureValue, Result, ScalarKind, ShapeId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Literal value in an override entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideLiteral {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Fixed value for a member with a given name and scalar kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberOverride {
    /// Exact member name
    pub member: String,
    /// Declared scalar kind the override applies to
    pub kind: ScalarKind,
    /// Value used instead of the scalar table
    pub value: OverrideLiteral,
}

impl MemberOverride {
    pub fn new(member: impl Into<String>, kind: ScalarKind, value: OverrideLiteral) -> Self {
        Self {
            member: member.into(),
            kind,
            value,
        }
    }

    /// Convert the literal to a value of the declared kind
    ///
    /// Returns None when the literal cannot represent the kind.
    pub fn to_value(&self) -> Option<FixtureValue> {
        match (self.kind, &self.value) {
            (ScalarKind::String, OverrideLiteral::Text(s)) => Some(FixtureValue::String(s.clone())),
            (ScalarKind::Boolean, OverrideLiteral::Bool(b)) => Some(FixtureValue::Boolean(*b)),
            (ScalarKind::Integer, OverrideLiteral::Int(i)) => {
                i32::try_from(*i).ok().map(FixtureValue::Integer)
            }
            (ScalarKind::Long, OverrideLiteral::Int(i)) => Some(FixtureValue::Long(*i)),
            (ScalarKind::Float, OverrideLiteral::Float(f)) => Some(FixtureValue::Float(*f as f32)),
            (ScalarKind::Float, OverrideLiteral::Int(i)) => Some(FixtureValue::Float(*i as f32)),
            (ScalarKind::Double, OverrideLiteral::Float(f)) => Some(FixtureValue::Double(*f)),
            (ScalarKind::Double, OverrideLiteral::Int(i)) => Some(FixtureValue::Double(*i as f64)),
            _ => None,
        }
    }
}

/// Override and exclusion table used by synthesis and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Members receiving a fixed value instead of the scalar table
    pub member_overrides: Vec<MemberOverride>,

    /// Shapes constructed empty and never populated
    pub empty_collections: Vec<ShapeId>,

    /// Members never validated
    pub skip_members: Vec<String>,

    /// Members not validated on error structures
    pub error_metadata_members: Vec<String>,

    /// Members not validated on event stream structures
    pub event_stream_members: Vec<String>,

    /// Integer members that may carry an HTTP status instead of the fixture
    pub status_members: Vec<String>,

    /// Required value for status members holding an HTTP status
    pub status_value: i32,
}

/// Base64 of the string fixture
const CLIENT_CONTEXT_BASE64: &str = "JTJGVGVzdC1WYWx1ZS9+LiRcJip2YWx1ZQ==";

impl Default for FixtureConfig {
    fn default() -> Self {
        let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            member_overrides: vec![
                MemberOverride::new(
                    "AccountId",
                    ScalarKind::String,
                    OverrideLiteral::Text("0123456789".to_string()),
                ),
                MemberOverride::new("PartNumber", ScalarKind::Integer, OverrideLiteral::Int(100)),
                MemberOverride::new(
                    "ClientContextBase64",
                    ScalarKind::String,
                    OverrideLiteral::Text(CLIENT_CONTEXT_BASE64.to_string()),
                ),
            ],
            empty_collections: vec![
                ShapeId::new("com.amazonaws.s3#HeadersCollection"),
                ShapeId::new("com.amazonaws.s3#MetadataCollection"),
                ShapeId::new("com.amazonaws.s3#ParameterCollection"),
            ],
            skip_members: names(&["ContentLength", "ContentType"]),
            error_metadata_members: names(&["HelpLink", "Source", "HResult", "AmazonId2"]),
            event_stream_members: names(&["BufferSize"]),
            status_members: names(&["Status", "StatusCode"]),
            status_value: 200,
        }
    }
}

impl FixtureConfig {
    /// Table with no overrides and no exclusions
    pub fn empty() -> Self {
        Self {
            member_overrides: Vec::new(),
            empty_collections: Vec::new(),
            skip_members: Vec::new(),
            error_metadata_members: Vec::new(),
            event_stream_members: Vec::new(),
            status_members: Vec::new(),
            status_value: 200,
        }
    }

    /// Load a table from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FixtureError::Parse(format!("Failed to read fixture config {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            FixtureError::Yaml(err) => FixtureError::Parse(format!(
                "Failed to parse fixture config YAML from {:?}: {}",
                path, err
            )),
            other => other,
        })
    }

    /// Parse a table from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: FixtureConfig = serde_yaml::from_str(content)?;
        config.check_overrides()?;
        Ok(config)
    }

    fn check_overrides(&self) -> Result<()> {
        for entry in &self.member_overrides {
            if entry.to_value().is_none() {
                return Err(FixtureError::Parse(format!(
                    "Override for member '{}' has a value that is not a {}",
                    entry.member, entry.kind
                )));
            }
        }
        Ok(())
    }

    /// Override value for a member name and declared kind
    pub fn override_for(&self, member: &str, kind: ScalarKind) -> Option<FixtureValue> {
        self.member_overrides
            .iter()
            .find(|o| o.member == member && o.kind == kind)
            .and_then(MemberOverride::to_value)
    }

    pub fn is_empty_collection(&self, id: &ShapeId) -> bool {
        self.empty_collections.contains(id)
    }

    pub fn is_skipped(&self, member: &str) -> bool {
        self.skip_members.iter().any(|m| m == member)
    }

    pub fn is_error_metadata(&self, member: &str) -> bool {
        self.error_metadata_members.iter().any(|m| m == member)
    }

    pub fn is_event_stream_member(&self, member: &str) -> bool {
        self.event_stream_members.iter().any(|m| m == member)
    }

    pub fn is_status_member(&self, member: &str) -> bool {
        self.status_members.iter().any(|m| m == member)
    }
}
