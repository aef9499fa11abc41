//! Fixed fixture value per scalar kind
//!
//! The same kind always receives the same value, across runs and across
//! objects, so synthesized graphs can be compared structurally.

use chrono::{DateTime, Utc};
use serde_json::json;
use shape_fixtures_common::{Blob, FixtureConfig, FixtureValue, ScalarKind};

/// String fixture; contains characters that need escaping in URLs and XML
pub const FIXTURE_STRING: &str = "%2FTest-Value/~.$\\&*value";

/// Blob fixture bytes
pub const FIXTURE_BLOB: &[u8] = b"shape-fixtures blob payload \x00\x01\x02\xfe\xff";

/// Timestamp fixture: 2009-11-11T18:12:00Z
pub const FIXTURE_EPOCH_SECONDS: i64 = 1_257_963_120;

pub fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXTURE_EPOCH_SECONDS, 0).unwrap_or_default()
}

pub fn fixture_document() -> serde_json::Value {
    json!([{ "Hello": "World", "Testing": true }, 42])
}

/// Table value for a scalar kind
pub fn fixture_for(kind: ScalarKind) -> FixtureValue {
    match kind {
        ScalarKind::String => FixtureValue::String(FIXTURE_STRING.to_string()),
        ScalarKind::Boolean => FixtureValue::Boolean(true),
        ScalarKind::Integer => FixtureValue::Integer(i32::MAX),
        ScalarKind::Long => FixtureValue::Long(i64::MAX),
        ScalarKind::Float => FixtureValue::Float(f32::MAX),
        ScalarKind::Double => FixtureValue::Double(f64::MAX),
        ScalarKind::Timestamp => FixtureValue::Timestamp(fixture_timestamp()),
        ScalarKind::Blob => FixtureValue::Blob(Blob::new(FIXTURE_BLOB)),
        ScalarKind::Document => FixtureValue::Document(fixture_document()),
    }
}

/// Value for a scalar in member position: named override first, then the table
pub fn member_fixture(
    config: &FixtureConfig,
    member: Option<&str>,
    kind: ScalarKind,
) -> FixtureValue {
    member
        .and_then(|name| config.override_for(name, kind))
        .unwrap_or_else(|| fixture_for(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(
            fixture_for(ScalarKind::String),
            FixtureValue::String(FIXTURE_STRING.to_string())
        );
        assert_eq!(fixture_for(ScalarKind::Boolean), FixtureValue::Boolean(true));
        assert_eq!(fixture_for(ScalarKind::Integer), FixtureValue::Integer(i32::MAX));
        assert_eq!(fixture_for(ScalarKind::Long), FixtureValue::Long(i64::MAX));
        assert_eq!(fixture_for(ScalarKind::Float), FixtureValue::Float(f32::MAX));
        assert_eq!(fixture_for(ScalarKind::Double), FixtureValue::Double(f64::MAX));
    }

    #[test]
    fn test_timestamp_is_fixed() {
        assert_eq!(
            fixture_timestamp().to_rfc3339(),
            "2009-11-11T18:12:00+00:00"
        );
    }

    #[test]
    fn test_blob_is_non_empty() {
        match fixture_for(ScalarKind::Blob) {
            FixtureValue::Blob(blob) => {
                assert!(!blob.is_empty());
                assert_eq!(blob.as_bytes(), FIXTURE_BLOB);
            }
            other => panic!("expected blob, got {:?}", other),
        }
    }

    #[test]
    fn test_member_override_precedence() {
        let config = FixtureConfig::default();
        assert_eq!(
            member_fixture(&config, Some("AccountId"), ScalarKind::String),
            FixtureValue::String("0123456789".to_string())
        );
        assert_eq!(
            member_fixture(&config, Some("PartNumber"), ScalarKind::Integer),
            FixtureValue::Integer(100)
        );
        // Bare types never take an override
        assert_eq!(
            member_fixture(&config, None, ScalarKind::Integer),
            FixtureValue::Integer(i32::MAX)
        );
    }
}
