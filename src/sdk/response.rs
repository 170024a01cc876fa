use crate::model::{
    Condition, FunctionResult, ResponseMeta, RunFunctionRequest, RunFunctionResponse, Severity,
    State, Status, Target,
};
use crate::resource::DesiredComposedResources;
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

/// How long the orchestrator may cache a response unless told otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Starts a response to `req`, carrying forward its tag, desired state and context.
pub fn to(req: &RunFunctionRequest, ttl: Duration) -> RunFunctionResponse {
    RunFunctionResponse {
        meta: ResponseMeta {
            tag: req.tag().to_string(),
            ttl: Some(ttl),
        },
        desired: req.desired.clone(),
        context: req.context.clone(),
        ..RunFunctionResponse::default()
    }
}

/// Renders `err` followed by each of its sources, separated by `": "`.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Refines a condition that was just added to a response.
pub struct ConditionOption<'a> {
    condition: &'a mut Condition,
}

impl ConditionOption<'_> {
    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.condition.message = Some(message.into());
        self
    }

    pub fn target_composite(self) -> Self {
        self.condition.target = Some(Target::Composite);
        self
    }

    pub fn target_composite_and_claim(self) -> Self {
        self.condition.target = Some(Target::CompositeAndClaim);
        self
    }
}

fn condition<'a>(
    rsp: &'a mut RunFunctionResponse,
    status: Status,
    type_: &str,
    reason: &str,
) -> ConditionOption<'a> {
    let index = rsp.conditions.len();
    rsp.conditions.push(Condition {
        type_: type_.to_string(),
        status,
        reason: reason.to_string(),
        message: None,
        target: Some(Target::Composite),
    });
    ConditionOption {
        condition: &mut rsp.conditions[index],
    }
}

/// Adds a condition with status `True`, targeted at the composite.
pub fn condition_true<'a>(
    rsp: &'a mut RunFunctionResponse,
    type_: &str,
    reason: &str,
) -> ConditionOption<'a> {
    condition(rsp, Status::True, type_, reason)
}

/// Adds a condition with status `False`, targeted at the composite.
pub fn condition_false<'a>(
    rsp: &'a mut RunFunctionResponse,
    type_: &str,
    reason: &str,
) -> ConditionOption<'a> {
    condition(rsp, Status::False, type_, reason)
}

/// Refines a result that was just added to a response.
pub struct ResultOption<'a> {
    result: &'a mut FunctionResult,
}

impl ResultOption<'_> {
    pub fn with_reason(self, reason: impl Into<String>) -> Self {
        self.result.reason = Some(reason.into());
        self
    }

    pub fn target_composite_and_claim(self) -> Self {
        self.result.target = Some(Target::CompositeAndClaim);
        self
    }
}

fn result(rsp: &mut RunFunctionResponse, severity: Severity, message: String) -> ResultOption<'_> {
    let index = rsp.results.len();
    rsp.results.push(FunctionResult {
        severity,
        message,
        reason: None,
        target: Some(Target::Composite),
    });
    ResultOption {
        result: &mut rsp.results[index],
    }
}

/// Adds a fatal result. The orchestrator stops the pipeline for this run.
pub fn fatal<'a>(rsp: &'a mut RunFunctionResponse, err: &dyn Error) -> ResultOption<'a> {
    result(rsp, Severity::Fatal, error_chain(err))
}

pub fn normal(rsp: &mut RunFunctionResponse, message: impl Into<String>) -> ResultOption<'_> {
    result(rsp, Severity::Normal, message.into())
}

/// Replaces the desired composed resources of `rsp` with `desired`.
///
/// Callers that want to keep resources desired earlier in the pipeline must start
/// from [`get_desired_composed_resources`](crate::sdk::request::get_desired_composed_resources).
pub fn set_desired_composed_resources(
    rsp: &mut RunFunctionResponse,
    desired: DesiredComposedResources,
) {
    let state = rsp.desired.get_or_insert_with(State::default);
    state.resources = desired
        .into_iter()
        .map(|(name, dc)| (name, dc.into()))
        .collect();
}

pub fn set_context_key(rsp: &mut RunFunctionResponse, key: impl Into<String>, value: Value) {
    rsp.context.get_or_insert_with(Default::default).insert(key.into(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestMeta;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("cannot read spec.names")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("spec.names: no such field")]
    struct Inner;

    #[test]
    fn to_carries_the_request_forward() {
        let req = RunFunctionRequest {
            meta: Some(RequestMeta { tag: "hello".into() }),
            desired: Some(State::default()),
            ..RunFunctionRequest::default()
        };
        let rsp = to(&req, DEFAULT_TTL);
        assert_eq!(rsp.meta.tag, "hello");
        assert_eq!(rsp.meta.ttl, Some(Duration::from_secs(60)));
        assert_eq!(rsp.desired, Some(State::default()));
        assert!(rsp.conditions.is_empty() && rsp.results.is_empty());
    }

    #[test]
    fn conditions_default_to_the_composite() {
        let mut rsp = RunFunctionResponse::default();
        condition_true(&mut rsp, "FunctionSuccess", "Success");
        condition_false(&mut rsp, "FunctionSuccess", "InternalError")
            .with_message("Something went wrong.")
            .target_composite_and_claim();

        assert_eq!(rsp.conditions[0].target, Some(Target::Composite));
        assert_eq!(rsp.conditions[0].status, Status::True);
        assert_eq!(rsp.conditions[1].target, Some(Target::CompositeAndClaim));
        assert_eq!(rsp.conditions[1].message.as_deref(), Some("Something went wrong."));
    }

    #[test]
    fn fatal_results_carry_the_whole_error_chain() {
        let mut rsp = RunFunctionResponse::default();
        fatal(&mut rsp, &Outer(Inner));
        assert!(rsp.is_fatal());
        assert_eq!(rsp.results[0].message, "cannot read spec.names: spec.names: no such field");
        assert_eq!(rsp.results[0].target, Some(Target::Composite));

        normal(&mut rsp, "fine").with_reason("Ok").target_composite_and_claim();
        assert_eq!(rsp.results[1].severity, Severity::Normal);
        assert_eq!(rsp.results[1].reason.as_deref(), Some("Ok"));
    }

    #[test]
    fn context_keys_are_set() {
        let mut rsp = RunFunctionResponse::default();
        set_context_key(&mut rsp, "v2-test/count", Value::from(2));
        assert_eq!(rsp.context.unwrap()["v2-test/count"], 2);
    }
}
