//! JSON to fixture value decoding
//!
//! Interprets a JSON document according to a shape so serialized typed
//! values and fixture files can be validated. JSON that does not fit the
//! declared shape is kept as `Unrecognized` for the validator to report.

use crate::classifier::{classify, TypeDescriptor};
use chrono::{DateTime, Utc};
use serde_json::Value;
use shape_fixtures_common::{Blob, FixtureConfig, FixtureValue, ScalarKind, ShapeId, ShapeRegistry};
use std::collections::BTreeMap;

/// Decode `json` as an instance of `id`
pub fn decode(
    registry: &ShapeRegistry,
    config: &FixtureConfig,
    id: &ShapeId,
    json: &Value,
) -> FixtureValue {
    if json.is_null() {
        return FixtureValue::Null;
    }

    match classify(registry, config, id) {
        TypeDescriptor::Scalar(kind) => decode_scalar(kind, json),
        TypeDescriptor::ConstantLike(_) => match json {
            Value::String(s) => FixtureValue::String(s.clone()),
            other => FixtureValue::Unrecognized(other.clone()),
        },
        TypeDescriptor::Callback | TypeDescriptor::Opaque => {
            FixtureValue::Unrecognized(json.clone())
        }
        TypeDescriptor::EmptyCollection { .. } => match json {
            Value::Array(items) => FixtureValue::List(
                items.iter().map(|v| FixtureValue::Unrecognized(v.clone())).collect(),
            ),
            Value::Object(entries) => FixtureValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), FixtureValue::Unrecognized(v.clone())))
                    .collect(),
            ),
            other => FixtureValue::Unrecognized(other.clone()),
        },
        TypeDescriptor::Sequence { element } => match json {
            Value::Array(items) => FixtureValue::List(
                items
                    .iter()
                    .map(|item| decode(registry, config, element, item))
                    .collect(),
            ),
            other => FixtureValue::Unrecognized(other.clone()),
        },
        TypeDescriptor::Mapping { value, .. } => match json {
            Value::Object(entries) => FixtureValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), decode(registry, config, value, v)))
                    .collect(),
            ),
            other => FixtureValue::Unrecognized(other.clone()),
        },
        TypeDescriptor::Composite { members, .. } => match json {
            Value::Object(entries) => {
                let mut fields = BTreeMap::new();
                for m in members {
                    if let Some(field) = entries.get(&m.name) {
                        fields.insert(m.name.clone(), decode(registry, config, &m.target, field));
                    }
                }
                FixtureValue::Structure(fields)
            }
            other => FixtureValue::Unrecognized(other.clone()),
        },
    }
}

fn decode_scalar(kind: ScalarKind, json: &Value) -> FixtureValue {
    let decoded = match kind {
        ScalarKind::String => json.as_str().map(|s| FixtureValue::String(s.to_string())),
        ScalarKind::Boolean => json.as_bool().map(FixtureValue::Boolean),
        ScalarKind::Integer => json
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(FixtureValue::Integer),
        ScalarKind::Long => json.as_i64().map(FixtureValue::Long),
        ScalarKind::Float => json.as_f64().map(|f| FixtureValue::Float(f as f32)),
        ScalarKind::Double => json.as_f64().map(FixtureValue::Double),
        ScalarKind::Timestamp => json
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|ts| FixtureValue::Timestamp(ts.with_timezone(&Utc))),
        ScalarKind::Blob => decode_bytes(json).map(|bytes| FixtureValue::Blob(Blob::new(bytes))),
        ScalarKind::Document => Some(FixtureValue::Document(json.clone())),
    };
    decoded.unwrap_or_else(|| FixtureValue::Unrecognized(json.clone()))
}

fn decode_bytes(json: &Value) -> Option<Vec<u8>> {
    json.as_array()?
        .iter()
        .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect()
}
