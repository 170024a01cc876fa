//! Rendering of desired ConfigMaps.
//!
//! Synthesis is additive: it inserts one entry per name and never removes or
//! rewrites entries under keys it does not produce. It is not atomic either. When
//! a conversion fails, entries inserted for earlier names stay in the collection.

use crate::resource::{
    ConfigMap, ConversionError, DesiredComposed, DesiredComposedResources, Object, Scheme,
};
use thiserror::Error;

/// Prefix of every composition key this function writes.
pub const RESOURCE_KEY_PREFIX: &str = "v2-test-";

pub fn resource_key(name: &str) -> String {
    format!("{RESOURCE_KEY_PREFIX}{name}")
}

#[derive(Debug, Error)]
#[error("cannot convert {kind} {name:?} to a composed resource")]
pub struct SynthesisError {
    pub kind: &'static str,
    pub name: String,
    #[source]
    pub source: ConversionError,
}

/// Renders a ConfigMap `{key_name: data_value}` for each name into `desired`.
///
/// Duplicate names collapse onto one key; the last one wins.
pub fn synthesize(
    scheme: &Scheme,
    names: &[String],
    data_value: &str,
    key_name: &str,
    desired: &mut DesiredComposedResources,
) -> Result<(), SynthesisError> {
    synthesize_with(
        scheme,
        names,
        |name| ConfigMap::new(name).with_data(key_name, data_value),
        desired,
    )
}

/// Renders `build(name)` for each name into `desired`, stopping at the first
/// object the scheme cannot convert.
pub fn synthesize_with<T: Object>(
    scheme: &Scheme,
    names: &[String],
    mut build: impl FnMut(&str) -> T,
    desired: &mut DesiredComposedResources,
) -> Result<(), SynthesisError> {
    for name in names {
        let obj = build(name);
        let resource = scheme.from_object(&obj).map_err(|source| SynthesisError {
            kind: T::KIND,
            name: name.clone(),
            source,
        })?;
        desired.insert(resource_key(name), DesiredComposed::new(resource));
    }
    Ok(())
}
