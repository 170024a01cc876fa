//! Conversion of typed objects into composed-resource documents.
//!
//! A [`Scheme`] records which `(apiVersion, kind)` pairs this function knows how to
//! emit. Converting a type that was never registered fails with
//! [`ConversionError::NotRegistered`] instead of producing a document the
//! orchestrator could not apply.

use super::Unstructured;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// A typed resource with a fixed API version and kind.
pub trait Object: Serialize {
    const API_VERSION: &'static str;
    const KIND: &'static str;
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("no kind {kind:?} is registered for version {api_version:?} in scheme")]
    NotRegistered {
        api_version: &'static str,
        kind: &'static str,
    },
    #[error("cannot serialize object")]
    Serialize(#[source] serde_json::Error),
    #[error("object did not serialize to a JSON object")]
    NotAnObject,
}

/// The set of object types that may be converted into composed resources.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    registered: BTreeSet<(&'static str, &'static str)>,
}

impl Scheme {
    /// An empty scheme. Nothing converts until types are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheme with the core `v1` types this function emits.
    pub fn core() -> Self {
        let mut scheme = Self::new();
        scheme.register::<super::ConfigMap>();
        scheme
    }

    pub fn register<T: Object>(&mut self) -> &mut Self {
        self.registered.insert((T::API_VERSION, T::KIND));
        self
    }

    pub fn is_registered<T: Object>(&self) -> bool {
        self.registered.contains(&(T::API_VERSION, T::KIND))
    }

    /// Converts `obj` to an unstructured document stamped with its type.
    pub fn from_object<T: Object>(&self, obj: &T) -> Result<Unstructured, ConversionError> {
        if !self.is_registered::<T>() {
            return Err(ConversionError::NotRegistered {
                api_version: T::API_VERSION,
                kind: T::KIND,
            });
        }
        let Value::Object(mut object) =
            serde_json::to_value(obj).map_err(ConversionError::Serialize)?
        else {
            return Err(ConversionError::NotAnObject);
        };
        object.insert("apiVersion".into(), T::API_VERSION.into());
        object.insert("kind".into(), T::KIND.into());
        Ok(Unstructured::new(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ConfigMap;
    use serde_json::json;

    #[derive(Serialize)]
    struct Bare(&'static str);

    impl Object for Bare {
        const API_VERSION: &'static str = "example.org/v1";
        const KIND: &'static str = "Bare";
    }

    #[test]
    fn stamps_type_meta_on_registered_objects() {
        let cm = ConfigMap::new("cool-cm-1").with_data("cool-key", "cool-value");
        let u = Scheme::core().from_object(&cm).unwrap();
        assert_eq!(
            Value::Object(u.into_object()),
            json!({
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": {"name": "cool-cm-1"},
                "data": {"cool-key": "cool-value"}
            })
        );
    }

    #[test]
    fn unregistered_types_do_not_convert() {
        let err = Scheme::new().from_object(&ConfigMap::new("x")).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::NotRegistered {
                api_version: "v1",
                kind: "ConfigMap"
            }
        ));
        assert_eq!(
            err.to_string(),
            r#"no kind "ConfigMap" is registered for version "v1" in scheme"#
        );
    }

    #[test]
    fn non_object_serializations_are_rejected() {
        let mut scheme = Scheme::new();
        scheme.register::<Bare>();
        assert!(scheme.is_registered::<Bare>());
        let err = scheme.from_object(&Bare("x")).unwrap_err();
        assert!(matches!(err, ConversionError::NotAnObject));
    }
}
