use serde::{Deserialize, Serialize};

pub const INPUT_API_VERSION: &str = "template.fn.crossplane.io/v1beta1";
pub const INPUT_KIND: &str = "Input";

/// Input supplied with each invocation of the function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    /// The data key every rendered ConfigMap stores the composite's `dataValue` under.
    pub key_name: String,
}
