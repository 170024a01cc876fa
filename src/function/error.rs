//! Error types for the v2-test function.
//!
//! Every variant is fatal for the run it occurs in. The reporter turns it into a
//! generic `FunctionSuccess=False` condition for users and a fatal result carrying
//! the full error chain for operators.

use super::synthesize::SynthesisError;
use crate::model::Target;
use crate::resource::FieldError;
use crate::sdk::request::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("cannot get observed composite resource from request")]
    ObservedComposite(#[source] RequestError),

    #[error("cannot get function input from request")]
    Input(#[source] RequestError),

    #[error("cannot read {path} field of {xr_kind}")]
    Field {
        path: &'static str,
        xr_kind: String,
        #[source]
        source: FieldError,
    },

    #[error("cannot synthesize desired composed resources")]
    Synthesis(#[from] SynthesisError),
}

/// The three failure classes a run can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request is missing the composite or the input.
    Request,
    /// A composite field is absent or has the wrong shape.
    Field,
    /// A rendered resource could not be converted.
    Synthesis,
}

impl FunctionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            FunctionError::ObservedComposite(_) | FunctionError::Input(_) => ErrorClass::Request,
            FunctionError::Field { .. } => ErrorClass::Field,
            FunctionError::Synthesis(_) => ErrorClass::Synthesis,
        }
    }

    /// Whether the run is unsalvageable. No class is currently recoverable.
    pub fn is_fatal(&self) -> bool {
        match self.class() {
            ErrorClass::Request | ErrorClass::Field | ErrorClass::Synthesis => true,
        }
    }

    /// Who should see the failure condition. The input belongs to whoever wrote
    /// the composition, so claim owners see input problems too.
    pub fn condition_target(&self) -> Target {
        match self {
            FunctionError::Input(_) => Target::CompositeAndClaim,
            _ => Target::Composite,
        }
    }
}
