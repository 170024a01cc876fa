use crate::model::RunFunctionRequest;
use crate::resource::{
    Composite, DesiredComposed, DesiredComposedResources, ObservedComposed,
    ObservedComposedResources,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A required section of the request is absent or unreadable.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request has no observed composite resource")]
    MissingObservedComposite,
    #[error("request has no function input")]
    MissingInput,
    #[error("cannot decode function input")]
    InvalidInput(#[source] serde_json::Error),
}

pub fn get_observed_composite_resource(
    req: &RunFunctionRequest,
) -> Result<Composite, RequestError> {
    req.observed
        .as_ref()
        .and_then(|o| o.composite.as_ref())
        .map(Composite::from)
        .ok_or(RequestError::MissingObservedComposite)
}

/// Decodes the function's input into `T`.
pub fn get_input<T: DeserializeOwned>(req: &RunFunctionRequest) -> Result<T, RequestError> {
    let input = req.input.clone().ok_or(RequestError::MissingInput)?;
    serde_json::from_value(Value::Object(input)).map_err(RequestError::InvalidInput)
}

/// Composed resources desired by functions earlier in the pipeline.
pub fn get_desired_composed_resources(req: &RunFunctionRequest) -> DesiredComposedResources {
    req.desired
        .iter()
        .flat_map(|d| d.resources.iter())
        .map(|(name, r)| (name.clone(), DesiredComposed::from(r)))
        .collect()
}

pub fn get_observed_composed_resources(req: &RunFunctionRequest) -> ObservedComposedResources {
    req.observed
        .iter()
        .flat_map(|o| o.resources.iter())
        .map(|(name, r)| (name.clone(), ObservedComposed::from(r)))
        .collect()
}

/// A value written to the pipeline context by an earlier function.
pub fn get_context_key<'a>(req: &'a RunFunctionRequest, key: &str) -> Option<&'a Value> {
    req.context.as_ref().and_then(|c| c.get(key))
}
