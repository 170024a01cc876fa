//! Helpers for reading a [`RunFunctionRequest`](crate::model::RunFunctionRequest)
//! and building a [`RunFunctionResponse`](crate::model::RunFunctionResponse).
//!
//! Functions should never construct responses by hand: [`response::to`] carries the
//! request's desired state and context forward so that work done by earlier
//! functions in the pipeline is not lost.

pub mod request;
pub mod response;
