//! # function-v2-test
//!
//! > **A composition function that renders one ConfigMap per name.**
//!
//! The orchestrator calls the function once per reconciliation of a composite
//! resource. The function reads two fields off the observed composite:
//!
//! ```yaml
//! spec:
//!   dataValue: cool-value
//!   names: [cool-cm-1, cool-cm-2]
//! ```
//!
//! and, given the input `{keyName: cool-key}`, adds to the desired composed
//! resources:
//!
//! ```text
//! v2-test-cool-cm-1 -> ConfigMap cool-cm-1 {data: {cool-key: cool-value}}
//! v2-test-cool-cm-2 -> ConfigMap cool-cm-2 {data: {cool-key: cool-value}}
//! ```
//!
//! Resources desired by earlier functions in the pipeline are kept as they are.
//!
//! ## Outcome Reporting
//!
//! A run always produces a response. On success it carries the merged desired
//! resources and a `FunctionSuccess=True` condition for the composite and its
//! claim. On failure it carries a `FunctionSuccess=False` condition with a generic
//! message and a fatal result with the full error chain, and the desired state is
//! left exactly as the request had it.
//!
//! ## Module Tour
//!
//! ### 1. The Function ([`function`])
//! - **Role**: Field extraction, ConfigMap synthesis, outcome reporting.
//! - **Key items**: [`Function`](function::Function), [`synthesize`](function::synthesize),
//!   [`FunctionError`](function::FunctionError).
//!
//! ### 2. Documents ([`model`], [`resource`], [`sdk`])
//! - **Role**: Wire-shaped request/response types, path-addressed access to
//!   unstructured resources, and helpers to read requests and build responses.
//!
//! ### 3. Serving ([`framework`], [`lifecycle`])
//! - **Role**: A generic runner actor that feeds requests to a handler, plus
//!   configuration, tracing and start/shutdown wiring.
//!
//! ## Quick Start
//!
//! ```rust
//! use function_v2_test::function::Function;
//! use function_v2_test::model::{Resource, RunFunctionRequest, State};
//! use serde_json::json;
//!
//! let object = |v: serde_json::Value| v.as_object().cloned().unwrap();
//! let req = RunFunctionRequest {
//!     input: Some(object(json!({"keyName": "cool-key"}))),
//!     observed: Some(State {
//!         composite: Some(Resource::new(object(json!({
//!             "kind": "CoolXR",
//!             "spec": {"dataValue": "cool-value", "names": ["cool-cm-1"]}
//!         })))),
//!         ..State::default()
//!     }),
//!     ..RunFunctionRequest::default()
//! };
//!
//! let rsp = Function::new().run_function(&req);
//! assert!(!rsp.is_fatal());
//! assert!(rsp.desired.unwrap().resources.contains_key("v2-test-cool-cm-1"));
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod framework;
pub mod function;
pub mod lifecycle;
pub mod model;
pub mod resource;
pub mod sdk;
