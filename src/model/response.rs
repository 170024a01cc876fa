use super::{Condition, FunctionResult, State, Struct};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub tag: String,
    /// How long the orchestrator may cache this response.
    #[serde(default, with = "ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,
}

/// The outcome of one function run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFunctionResponse {
    #[serde(default)]
    pub meta: ResponseMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<State>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<FunctionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Struct>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl RunFunctionResponse {
    /// Whether a fatal result aborts the pipeline.
    pub fn is_fatal(&self) -> bool {
        self.results.iter().any(FunctionResult::is_fatal)
    }
}

/// Durations in protobuf JSON form, e.g. `"60s"` or `"1.500000000s"`.
mod ttl {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match ttl {
            Some(d) if d.subsec_nanos() == 0 => s.serialize_str(&format!("{}s", d.as_secs())),
            Some(d) => s.serialize_str(&format!("{}.{:09}s", d.as_secs(), d.subsec_nanos())),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        let digits = raw
            .strip_suffix('s')
            .ok_or_else(|| de::Error::custom(format!("duration {raw:?} must end in 's'")))?;
        let (secs, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let secs: u64 = secs.parse().map_err(de::Error::custom)?;
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("invalid fractional seconds in {raw:?}")));
        }
        let nanos: u32 = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<9}").parse().map_err(de::Error::custom)?
        };
        Ok(Some(Duration::new(secs, nanos)))
    }
}
