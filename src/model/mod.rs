//! Wire-shaped documents exchanged with the orchestrator.
//!
//! These mirror the `RunFunctionRequest` / `RunFunctionResponse` messages of the
//! composition function protocol. Field names serialize in camelCase and enums as
//! their protocol names, so a transport layer can hand them over as JSON as-is.

pub mod condition;
pub mod request;
pub mod response;
pub mod state;

pub use condition::*;
pub use request::*;
pub use response::*;
pub use state::*;

/// A loosely-typed JSON object (the protocol's `google.protobuf.Struct`).
pub type Struct = serde_json::Map<String, serde_json::Value>;
