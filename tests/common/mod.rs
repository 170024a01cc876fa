#![allow(dead_code)]

use function_v2_test::model::{RequestMeta, Resource, RunFunctionRequest, State, Struct};
use serde_json::{json, Value};

pub fn object(v: Value) -> Struct {
    match v {
        Value::Object(m) => m,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn input(key_name: &str) -> Struct {
    object(json!({
        "apiVersion": "template.fn.crossplane.io/v1beta1",
        "kind": "Input",
        "keyName": key_name
    }))
}

pub fn composite(spec: Value) -> Resource {
    Resource::new(object(json!({
        "apiVersion": "v2.test.crossplane.io/v1",
        "kind": "CoolXR",
        "metadata": {"name": "test-xr"},
        "spec": spec
    })))
}

/// A request observing a CoolXR with the given spec.
pub fn request(key_name: &str, spec: Value) -> RunFunctionRequest {
    RunFunctionRequest {
        meta: Some(RequestMeta { tag: "hello".into() }),
        input: Some(input(key_name)),
        observed: Some(State {
            composite: Some(composite(spec)),
            ..State::default()
        }),
        ..RunFunctionRequest::default()
    }
}

pub fn cool_request() -> RunFunctionRequest {
    request(
        "cool-key",
        json!({"dataValue": "cool-value", "names": ["cool-cm-1", "cool-cm-2"]}),
    )
}
