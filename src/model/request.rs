use super::{State, Struct};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// Opaque tag the orchestrator uses to correlate and cache responses.
    #[serde(default)]
    pub tag: String,
}

/// A request to run the function once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFunctionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<State>,
    /// State desired by functions earlier in the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Struct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Struct>,
}

impl RunFunctionRequest {
    pub fn tag(&self) -> &str {
        self.meta.as_ref().map(|m| m.tag.as_str()).unwrap_or_default()
    }
}
