//! Integration test for Smithy models driving fixture synthesis

use shape_fixtures_common::{FixtureConfig, FixtureValue, ShapeId, ShapeRegistry};
use shape_fixtures_parser::{load_smithy_model, SmithyParser};
use shape_fixtures_synth::{collection_len, decode, Synthesizer, Validator, FIXTURE_STRING};
use std::io::Write;

const STORAGE_MODEL: &str = r#"{
    "smithy": "2.0",
    "shapes": {
        "com.example.storage#StorageService": {
            "type": "service",
            "version": "2023-01-01",
            "operations": [
                { "target": "com.example.storage#GetBucket" },
                { "target": "com.example.storage#SubscribeEvents" }
            ]
        },
        "com.example.storage#GetBucket": {
            "type": "operation",
            "input": { "target": "com.example.storage#GetBucketInput" },
            "output": { "target": "com.example.storage#Bucket" },
            "errors": [{ "target": "com.example.storage#NoSuchBucket" }]
        },
        "com.example.storage#SubscribeEvents": {
            "type": "operation",
            "input": { "target": "com.example.storage#GetBucketInput" },
            "output": { "target": "com.example.storage#BucketEvents" }
        },
        "com.example.storage#GetBucketInput": {
            "type": "structure",
            "members": {
                "BucketName": { "target": "smithy.api#String" },
                "AccountId": { "target": "smithy.api#String" }
            }
        },
        "com.example.storage#Bucket": {
            "type": "structure",
            "members": {
                "Name": { "target": "smithy.api#String" },
                "Parent": { "target": "com.example.storage#Bucket" },
                "Tier": { "target": "com.example.storage#Tier" },
                "Tags": { "target": "com.example.storage#TagList" },
                "Labels": { "target": "com.example.storage#LabelMap" },
                "Size": { "target": "smithy.api#Long" },
                "Created": { "target": "smithy.api#Timestamp" },
                "Body": { "target": "smithy.api#Blob" },
                "Status": { "target": "smithy.api#Integer" },
                "Shard": { "target": "com.example.storage#ShardId" }
            }
        },
        "com.example.storage#Tier": {
            "type": "enum",
            "members": {
                "STANDARD": {
                    "target": "smithy.api#Unit",
                    "traits": { "smithy.api#enumValue": "Standard" }
                },
                "ARCHIVE": {
                    "target": "smithy.api#Unit",
                    "traits": { "smithy.api#enumValue": "Archive" }
                }
            }
        },
        "com.example.storage#TagList": {
            "type": "list",
            "member": { "target": "com.example.storage#Tag" }
        },
        "com.example.storage#Tag": {
            "type": "structure",
            "members": {
                "Key": { "target": "smithy.api#String" },
                "Value": { "target": "smithy.api#String" }
            }
        },
        "com.example.storage#LabelMap": {
            "type": "map",
            "key": { "target": "smithy.api#String" },
            "value": { "target": "smithy.api#String" }
        },
        "com.example.storage#ShardId": { "type": "short" },
        "com.example.storage#NoSuchBucket": {
            "type": "structure",
            "members": {
                "Message": { "target": "smithy.api#String" },
                "HelpLink": { "target": "smithy.api#String" }
            },
            "traits": { "smithy.api#error": "client" }
        },
        "com.example.storage#BucketEvents": {
            "type": "union",
            "members": {
                "Record": { "target": "smithy.api#Blob" },
                "BufferSize": { "target": "smithy.api#Integer" }
            },
            "traits": { "smithy.api#streaming": {} }
        }
    }
}"#;

fn storage_registry() -> ShapeRegistry {
    SmithyParser::from_json(STORAGE_MODEL).unwrap().parse().unwrap()
}

fn synthesize(registry: &ShapeRegistry, id: &str) -> FixtureValue {
    let config = FixtureConfig::default();
    Synthesizer::new(registry, &config)
        .synthesize(&ShapeId::new(id))
        .unwrap()
}

fn validate(registry: &ShapeRegistry, id: &str, value: &FixtureValue) -> Vec<String> {
    let config = FixtureConfig::default();
    Validator::new(registry, &config)
        .validate_all(&ShapeId::new(id), value)
        .paths()
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn test_load_model_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STORAGE_MODEL.as_bytes()).unwrap();

    let registry = load_smithy_model(file.path()).unwrap();
    assert!(registry.contains(&"com.example.storage#Bucket".into()));
    assert!(registry.contains(&"smithy.api#String".into()));
    assert!(registry.dangling_references().is_empty());
}

#[test]
fn test_missing_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_smithy_model(dir.path().join("missing.json"));
    assert!(result.is_err());
}

#[test]
fn test_synthesize_bucket() {
    let registry = storage_registry();
    let bucket = synthesize(&registry, "com.example.storage#Bucket");

    assert_eq!(
        bucket.member("Name"),
        Some(&FixtureValue::String(FIXTURE_STRING.to_string()))
    );
    // Recursive member is cut at the first repetition
    assert_eq!(bucket.member("Parent"), Some(&FixtureValue::Null));
    // Enum members sort by name, so ARCHIVE is canonical
    assert_eq!(
        bucket.member("Tier"),
        Some(&FixtureValue::String("Archive".to_string()))
    );
    assert_eq!(bucket.member("Size"), Some(&FixtureValue::Long(i64::MAX)));
    assert_eq!(bucket.member("Shard"), Some(&FixtureValue::Null));

    let tags = bucket.member("Tags").and_then(FixtureValue::entry_count);
    assert_eq!(tags, Some(collection_len(&"com.example.storage#Tag".into())));
    let labels = bucket.member("Labels").and_then(FixtureValue::entry_count);
    assert_eq!(labels, Some(collection_len(&"smithy.api#String".into())));

    assert!(validate(&registry, "com.example.storage#Bucket", &bucket).is_empty());
}

#[test]
fn test_validation_reports_member_paths() {
    let registry = storage_registry();
    let mut bucket = synthesize(&registry, "com.example.storage#Bucket");

    if let Some(FixtureValue::List(tags)) = bucket.member_mut("Tags") {
        if let Some(FixtureValue::Structure(fields)) = tags.get_mut(0) {
            fields.insert("Value".to_string(), FixtureValue::String("changed".to_string()));
        }
    }
    if let Some(size) = bucket.member_mut("Size") {
        *size = FixtureValue::Long(0);
    }

    assert_eq!(
        validate(&registry, "com.example.storage#Bucket", &bucket),
        vec!["Size", "Tags[0].Value"]
    );
}

#[test]
fn test_status_member_accepts_http_ok_only() {
    let registry = storage_registry();
    let mut bucket = synthesize(&registry, "com.example.storage#Bucket");

    if let Some(status) = bucket.member_mut("Status") {
        *status = FixtureValue::Integer(200);
    }
    assert!(validate(&registry, "com.example.storage#Bucket", &bucket).is_empty());

    if let Some(status) = bucket.member_mut("Status") {
        *status = FixtureValue::Integer(404);
    }
    assert_eq!(
        validate(&registry, "com.example.storage#Bucket", &bucket),
        vec!["Status"]
    );
}

#[test]
fn test_error_and_event_stream_exclusions() {
    let registry = storage_registry();

    let mut error = synthesize(&registry, "com.example.storage#NoSuchBucket");
    if let Some(link) = error.member_mut("HelpLink") {
        *link = FixtureValue::Null;
    }
    assert!(validate(&registry, "com.example.storage#NoSuchBucket", &error).is_empty());

    let mut events = synthesize(&registry, "com.example.storage#BucketEvents");
    if let Some(buffer) = events.member_mut("BufferSize") {
        *buffer = FixtureValue::Integer(0);
    }
    assert!(validate(&registry, "com.example.storage#BucketEvents", &events).is_empty());
}

#[test]
fn test_operation_shapes_round_trip_through_json() {
    let parser = SmithyParser::from_json(STORAGE_MODEL).unwrap();
    let registry = parser.parse().unwrap();
    let config = FixtureConfig::default();

    let io = parser.operation_io("com.example.storage#GetBucket").unwrap();
    let input = io.input.unwrap();
    let output = io.output.unwrap();

    let request = Synthesizer::new(&registry, &config).synthesize(&input).unwrap();
    assert_eq!(
        request.member("AccountId"),
        Some(&FixtureValue::String("0123456789".to_string()))
    );

    let response = Synthesizer::new(&registry, &config).synthesize(&output).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let decoded = decode(&registry, &config, &output, &parsed);

    assert_eq!(Validator::new(&registry, &config).validate(&output, &decoded), Ok(()));
}
