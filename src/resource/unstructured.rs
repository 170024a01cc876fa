//! Path-addressed access to loosely-typed resource documents.
//!
//! Paths are dot-separated field names, each optionally followed by one or more
//! array indices: `spec.names`, `spec.names[0]`, `status.atProvider.ips[1]`.
//! Every read returns a [`FieldError`] naming the path when the value is absent
//! or has the wrong shape; nothing here panics or mutates on read.

use crate::model::Struct;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a field could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("no such field")]
    Missing,
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid field path")]
    InvalidPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct FieldError {
    pub path: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(path: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.kind == FieldErrorKind::Missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

fn parse_path(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(i) => part.split_at(i),
            None => (part, ""),
        };
        if name.is_empty() {
            return None;
        }
        segments.push(Segment::Field(name.to_string()));
        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index = rest.strip_prefix('[')?.get(..close - 1)?.parse().ok()?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
        }
    }
    Some(segments)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A resource held as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unstructured {
    object: Struct,
}

impl From<Struct> for Unstructured {
    fn from(object: Struct) -> Self {
        Self { object }
    }
}

impl Unstructured {
    pub fn new(object: Struct) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &Struct {
        &self.object
    }

    pub fn into_object(self) -> Struct {
        self.object
    }

    pub fn api_version(&self) -> &str {
        self.object
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.object
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.object
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Resolves `path` to the value it addresses.
    pub fn get_value(&self, path: &str) -> Result<&Value, FieldError> {
        let segments =
            parse_path(path).ok_or_else(|| FieldError::new(path, FieldErrorKind::InvalidPath))?;
        let mut segments = segments.iter();

        // parse_path never yields a leading index.
        let Some(Segment::Field(first)) = segments.next() else {
            return Err(FieldError::new(path, FieldErrorKind::InvalidPath));
        };
        let mut current = self
            .object
            .get(first)
            .ok_or_else(|| FieldError::new(path, FieldErrorKind::Missing))?;

        for segment in segments {
            let next = match (segment, current) {
                (Segment::Field(name), Value::Object(map)) => map.get(name),
                (Segment::Index(i), Value::Array(items)) => items.get(*i),
                (Segment::Field(_), other) => {
                    return Err(FieldError::new(path, wrong_type("object", other)))
                }
                (Segment::Index(_), other) => {
                    return Err(FieldError::new(path, wrong_type("array", other)))
                }
            };
            current = next.ok_or_else(|| FieldError::new(path, FieldErrorKind::Missing))?;
        }
        Ok(current)
    }

    pub fn get_string(&self, path: &str) -> Result<String, FieldError> {
        match self.get_value(path)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(FieldError::new(path, wrong_type("string", other))),
        }
    }

    /// Reads an array whose every element is a string, preserving order.
    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>, FieldError> {
        let items = match self.get_value(path)? {
            Value::Array(items) => items,
            other => return Err(FieldError::new(path, wrong_type("array", other))),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(FieldError::new(
                    format!("{path}[{i}]"),
                    wrong_type("string", other),
                )),
            })
            .collect()
    }

    /// Reads an object whose every value is a string.
    pub fn get_string_map(&self, path: &str) -> Result<BTreeMap<String, String>, FieldError> {
        let map = match self.get_value(path)? {
            Value::Object(map) => map,
            other => return Err(FieldError::new(path, wrong_type("object", other))),
        };
        map.iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(FieldError::new(
                    format!("{path}.{k}"),
                    wrong_type("string", other),
                )),
            })
            .collect()
    }

    /// Writes `value` at `path`, creating intermediate objects as needed.
    /// Array indices must already exist.
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), FieldError> {
        let segments =
            parse_path(path).ok_or_else(|| FieldError::new(path, FieldErrorKind::InvalidPath))?;
        // Commit only if the whole write succeeds.
        let mut root = Value::Object(self.object.clone());
        assign(&mut root, &segments, value).map_err(|kind| FieldError::new(path, kind))?;
        if let Value::Object(object) = root {
            self.object = object;
        }
        Ok(())
    }
}

fn assign(root: &mut Value, segments: &[Segment], value: Value) -> Result<(), FieldErrorKind> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(FieldErrorKind::InvalidPath);
    };

    let mut current = root;
    for segment in parents {
        current = match (segment, current) {
            (Segment::Field(name), Value::Object(map)) => map
                .entry(name.clone())
                .or_insert_with(|| Value::Object(Struct::new())),
            (Segment::Index(i), Value::Array(items)) => {
                items.get_mut(*i).ok_or(FieldErrorKind::Missing)?
            }
            (Segment::Field(_), other) => return Err(wrong_type("object", other)),
            (Segment::Index(_), other) => return Err(wrong_type("array", other)),
        };
    }

    match (last, current) {
        (Segment::Field(name), Value::Object(map)) => {
            map.insert(name.clone(), value);
        }
        (Segment::Index(i), Value::Array(items)) => {
            *items.get_mut(*i).ok_or(FieldErrorKind::Missing)? = value;
        }
        (Segment::Field(_), other) => return Err(wrong_type("object", other)),
        (Segment::Index(_), other) => return Err(wrong_type("array", other)),
    }
    Ok(())
}

fn wrong_type(expected: &'static str, found: &Value) -> FieldErrorKind {
    FieldErrorKind::WrongType {
        expected,
        found: json_type(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn xr() -> Unstructured {
        let Value::Object(object) = json!({
            "apiVersion": "v2.test.crossplane.io/v1",
            "kind": "CoolXR",
            "metadata": {"name": "test-xr"},
            "spec": {
                "dataValue": "cool-value",
                "names": ["cool-cm-1", "cool-cm-2"],
                "empty": [],
                "mixed": ["a", 1],
                "labels": {"team": "infra"}
            }
        }) else {
            unreachable!()
        };
        Unstructured::new(object)
    }

    #[test]
    fn reads_identity_fields() {
        let xr = xr();
        assert_eq!(xr.api_version(), "v2.test.crossplane.io/v1");
        assert_eq!(xr.kind(), "CoolXR");
        assert_eq!(xr.name(), "test-xr");
        assert_eq!(Unstructured::default().name(), "");
    }

    #[test]
    fn reads_strings_and_string_arrays() {
        let xr = xr();
        assert_eq!(xr.get_string("spec.dataValue").unwrap(), "cool-value");
        assert_eq!(
            xr.get_string_array("spec.names").unwrap(),
            vec!["cool-cm-1", "cool-cm-2"]
        );
        assert_eq!(xr.get_string("spec.names[1]").unwrap(), "cool-cm-2");
        assert!(xr.get_string_array("spec.empty").unwrap().is_empty());
        assert_eq!(xr.get_string_map("spec.labels").unwrap()["team"], "infra");
    }

    #[test]
    fn missing_fields_are_reported_with_their_path() {
        let err = xr().get_string_array("spec.nope").unwrap_err();
        assert_eq!(err.path, "spec.nope");
        assert!(err.is_missing());
        assert_eq!(err.to_string(), "spec.nope: no such field");

        let err = xr().get_string("spec.names[5]").unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn wrong_shapes_are_type_mismatches() {
        let err = xr().get_string("spec.names").unwrap_err();
        assert_eq!(
            err.kind,
            FieldErrorKind::WrongType {
                expected: "string",
                found: "array"
            }
        );

        let err = xr().get_string_array("spec.mixed").unwrap_err();
        assert_eq!(err.path, "spec.mixed[1]");

        let err = xr().get_string("spec.dataValue.deeper").unwrap_err();
        assert_eq!(
            err.kind,
            FieldErrorKind::WrongType {
                expected: "object",
                found: "string"
            }
        );
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for path in ["", "spec.", ".spec", "spec.names[", "spec.names[x]", "[0]"] {
            let err = xr().get_value(path).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::InvalidPath, "path {path:?}");
        }
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut u = Unstructured::default();
        u.set_value("spec.dataValue", json!("v")).unwrap();
        u.set_value("spec.names", json!(["a"])).unwrap();
        u.set_value("spec.names[0]", json!("b")).unwrap();
        assert_eq!(u.get_string("spec.dataValue").unwrap(), "v");
        assert_eq!(u.get_string_array("spec.names").unwrap(), vec!["b"]);

        let err = u.set_value("spec.dataValue.x", json!(1)).unwrap_err();
        assert!(matches!(err.kind, FieldErrorKind::WrongType { .. }));
    }

    #[test]
    fn failed_set_value_leaves_document_unchanged() {
        let mut u = Unstructured::default();
        let err = u.set_value("a.b[0]", json!("x")).unwrap_err();
        assert_eq!(err.path, "a.b[0]");
        assert!(matches!(err.kind, FieldErrorKind::WrongType { expected: "array", .. }));
        assert_eq!(u, Unstructured::default());

        let mut u = xr();
        let before = u.clone();
        assert!(u.set_value("spec.names[9]", json!("z")).is_err());
        assert!(u.set_value("spec.fresh.dataValue.x", json!(1)).is_ok());
        let written = u.clone();
        assert!(u.set_value("spec.other.mixed[0]", json!(1)).is_err());
        assert_eq!(u, written);
        assert_ne!(written, before);
    }
}
