//! Runtime wiring: configuration, observability and the runner lifecycle.
//!
//! # Main Components
//!
//! - [`FunctionSystem`] - Starts a runner for the function and shuts it down
//! - [`RunnerConfig`] - Settings read from the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod function_system;
pub mod tracing;

pub use config::*;
pub use function_system::*;
pub use self::tracing::*;
