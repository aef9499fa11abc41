//! Synthesis and validation of typed Rust values
//!
//! Values cross between `T` and the fixture graph through serde, so `T`'s
//! serialized member names must match its [`Describe`] impl.

use crate::decode::decode;
use crate::describe::Describe;
use crate::instantiator::Synthesizer;
use crate::validator::{ValidationFailure, ValidationReport, Validator};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shape_fixtures_common::{
    FixtureConfig, FixtureError, FixtureValue, Result, ShapeId, ShapeRegistry,
};

fn registry_for<T: Describe>() -> (ShapeRegistry, ShapeId) {
    let mut registry = ShapeRegistry::with_prelude();
    let root = T::describe(&mut registry);
    (registry, root)
}

/// Synthesize a fully populated `T` with the default override table
pub fn synthesize<T: Describe + DeserializeOwned>() -> Result<T> {
    synthesize_with(&FixtureConfig::default())
}

/// Synthesize a fully populated `T`
pub fn synthesize_with<T: Describe + DeserializeOwned>(config: &FixtureConfig) -> Result<T> {
    let (registry, root) = registry_for::<T>();
    let value = Synthesizer::new(&registry, config).synthesize(&root)?;
    let json = value.to_json()?;
    serde_json::from_value(json).map_err(|e| {
        FixtureError::Conversion(format!("Failed to build {} from fixture: {}", root, e))
    })
}

fn to_fixture<T: Describe + Serialize>(
    instance: &T,
    config: &FixtureConfig,
) -> std::result::Result<(ShapeRegistry, ShapeId, FixtureValue), ValidationFailure> {
    let (registry, root) = registry_for::<T>();
    let json = serde_json::to_value(instance).map_err(|e| ValidationFailure {
        path: "$".to_string(),
        message: format!("failed to serialize {}: {}", root, e),
    })?;
    let value = decode(&registry, config, &root, &json);
    Ok((registry, root, value))
}

/// Check `instance` against the default synthesis rules; first failure wins
pub fn validate<T: Describe + Serialize>(
    instance: &T,
) -> std::result::Result<(), ValidationFailure> {
    validate_with(instance, &FixtureConfig::default())
}

pub fn validate_with<T: Describe + Serialize>(
    instance: &T,
    config: &FixtureConfig,
) -> std::result::Result<(), ValidationFailure> {
    let (registry, root, value) = to_fixture(instance, config)?;
    Validator::new(&registry, config).validate(&root, &value)
}

/// Check `instance` and collect every failure
pub fn validate_all<T: Describe + Serialize>(
    instance: &T,
    config: &FixtureConfig,
) -> ValidationReport {
    match to_fixture(instance, config) {
        Ok((registry, root, value)) => {
            Validator::new(&registry, config).validate_all(&root, &value)
        }
        Err(failure) => ValidationReport {
            failures: vec![failure],
        },
    }
}

/// Panic with the failing field path unless `instance` is fully populated
#[track_caller]
pub fn assert_fully_populated<T: Describe + Serialize>(instance: &T) {
    if let Err(failure) = validate(instance) {
        panic!("{}", failure);
    }
}
