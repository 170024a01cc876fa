//! Runs the pipeline and reports its outcome on the response.
//!
//! A run always yields a response. Success commits the desired resources and sets
//! `FunctionSuccess=True`; any failure leaves the request's desired state as it
//! was, sets `FunctionSuccess=False` and adds a fatal result.

use super::{synthesize, Function, FunctionError, Input, DATA_VALUE_PATH, NAMES_PATH};
use crate::model::{RunFunctionRequest, RunFunctionResponse, Target};
use crate::resource::{DesiredComposedResources, FieldError};
use crate::sdk::{request, response};
use tracing::{debug, info, info_span, warn};

pub const CONDITION_TYPE: &str = "FunctionSuccess";
pub const REASON_SUCCESS: &str = "Success";
pub const REASON_INTERNAL_ERROR: &str = "InternalError";
/// Shown to users on failure. Details go to the fatal result only.
pub const FAILURE_MESSAGE: &str = "Something went wrong.";

/// What a run produced, before it is written to the response.
#[derive(Debug)]
pub enum Outcome {
    Success(DesiredComposedResources),
    Failure {
        error: FunctionError,
        target: Target,
        fatal: bool,
    },
}

impl From<Result<DesiredComposedResources, FunctionError>> for Outcome {
    fn from(result: Result<DesiredComposedResources, FunctionError>) -> Self {
        match result {
            Ok(desired) => Outcome::Success(desired),
            Err(error) => Outcome::Failure {
                target: error.condition_target(),
                fatal: error.is_fatal(),
                error,
            },
        }
    }
}

impl Function {
    /// Runs the function once against `req`.
    pub fn run_function(&self, req: &RunFunctionRequest) -> RunFunctionResponse {
        let span = info_span!("run_function", tag = req.tag());
        let _enter = span.enter();
        info!("Running function");

        let mut rsp = response::to(req, self.ttl);
        match self.outcome(req) {
            Outcome::Success(desired) => {
                response::set_desired_composed_resources(&mut rsp, desired);
                response::condition_true(&mut rsp, CONDITION_TYPE, REASON_SUCCESS)
                    .target_composite_and_claim();
            }
            Outcome::Failure {
                error,
                target,
                fatal,
            } => {
                warn!(error = %response::error_chain(&error), ?target, fatal, "Run failed");
                let condition =
                    response::condition_false(&mut rsp, CONDITION_TYPE, REASON_INTERNAL_ERROR)
                        .with_message(FAILURE_MESSAGE);
                match target {
                    Target::Composite => condition.target_composite(),
                    Target::CompositeAndClaim => condition.target_composite_and_claim(),
                };
                if fatal {
                    response::fatal(&mut rsp, &error);
                }
            }
        }
        rsp
    }

    /// Runs the pipeline without touching a response.
    pub fn outcome(&self, req: &RunFunctionRequest) -> Outcome {
        self.compose(req).into()
    }

    fn compose(&self, req: &RunFunctionRequest) -> Result<DesiredComposedResources, FunctionError> {
        let xr = request::get_observed_composite_resource(req)
            .map_err(FunctionError::ObservedComposite)?;
        let input: Input = request::get_input(req).map_err(FunctionError::Input)?;

        let xr_kind = xr.resource.kind();
        let span = info_span!(
            "composite",
            xr_version = xr.resource.api_version(),
            xr_kind,
            xr_name = xr.resource.name(),
        );
        let _enter = span.enter();

        let field_error = |path: &'static str| {
            move |source: FieldError| FunctionError::Field {
                path,
                xr_kind: xr_kind.to_string(),
                source,
            }
        };
        let names = xr
            .resource
            .get_string_array(NAMES_PATH)
            .map_err(field_error(NAMES_PATH))?;
        let data_value = xr
            .resource
            .get_string(DATA_VALUE_PATH)
            .map_err(field_error(DATA_VALUE_PATH))?;

        let mut desired = request::get_desired_composed_resources(req);
        debug!(existing = desired.len(), "Merging into desired composed resources");
        synthesize(&self.scheme, &names, &data_value, &input.key_name, &mut desired)?;

        info!(?names, count = names.len(), "Added desired configmaps");
        Ok(desired)
    }
}
