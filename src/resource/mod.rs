//! Resource documents: the composite this function observes and the composed
//! resources it desires.
//!
//! - [`unstructured`] - path-addressed reads over loosely-typed documents
//! - [`composed`] - the [`Scheme`] that turns typed objects into documents
//! - [`config_map`] - the one typed object this function emits

pub mod composed;
pub mod config_map;
pub mod unstructured;

pub use composed::{ConversionError, Object, Scheme};
pub use config_map::{ConfigMap, ObjectMeta};
pub use unstructured::{FieldError, FieldErrorKind, Unstructured};

use crate::model::{Ready, Resource};
use std::collections::BTreeMap;

/// The observed composite resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    pub resource: Unstructured,
    pub connection_details: BTreeMap<String, String>,
}

impl From<&Resource> for Composite {
    fn from(r: &Resource) -> Self {
        Self {
            resource: Unstructured::new(r.resource.clone()),
            connection_details: r.connection_details.clone(),
        }
    }
}

/// A composed resource as it currently exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedComposed {
    pub resource: Unstructured,
    pub connection_details: BTreeMap<String, String>,
}

impl From<&Resource> for ObservedComposed {
    fn from(r: &Resource) -> Self {
        Self {
            resource: Unstructured::new(r.resource.clone()),
            connection_details: r.connection_details.clone(),
        }
    }
}

/// A composed resource the pipeline wants to exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredComposed {
    pub resource: Unstructured,
    pub connection_details: BTreeMap<String, String>,
    pub ready: Ready,
}

impl DesiredComposed {
    pub fn new(resource: Unstructured) -> Self {
        Self {
            resource,
            connection_details: BTreeMap::new(),
            ready: Ready::Unspecified,
        }
    }
}

impl From<&Resource> for DesiredComposed {
    fn from(r: &Resource) -> Self {
        Self {
            resource: Unstructured::new(r.resource.clone()),
            connection_details: r.connection_details.clone(),
            ready: r.ready,
        }
    }
}

impl From<DesiredComposed> for Resource {
    fn from(d: DesiredComposed) -> Self {
        Resource {
            resource: d.resource.into_object(),
            connection_details: d.connection_details,
            ready: d.ready,
        }
    }
}

/// Desired composed resources keyed by their name in the composition.
/// Ordered so that identical inputs always render identical output.
pub type DesiredComposedResources = BTreeMap<String, DesiredComposed>;

/// Composed resources observed in the cluster, keyed like their desired
/// counterparts.
pub type ObservedComposedResources = BTreeMap<String, ObservedComposed>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn desired_round_trip_keeps_every_field() {
        let object = json!({"apiVersion": "s3.aws/v1", "kind": "Bucket"});
        let original = Resource {
            resource: object.as_object().cloned().unwrap(),
            connection_details: [("password".to_string(), "s3cr3t".to_string())].into(),
            ready: Ready::False,
        };

        let back: Resource = DesiredComposed::from(&original).into();
        assert_eq!(back, original);
    }
}
