//! Generic runner that serves a function to many callers.
//!
//! This module provides the building blocks for hosting a function behind a
//! message-passing boundary, the in-process stand-in for the gRPC service the
//! orchestrator talks to.
//!
//! # Main Components
//!
//! - [`FunctionHandler`] - Trait that function implementations provide
//! - [`FunctionRunner`] - Actor that owns a handler and processes run requests
//! - [`RunnerClient`] - Cloneable handle for submitting runs
//! - [`RunnerError`] - Errors from the runner plumbing itself
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test callers without running a real function.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
