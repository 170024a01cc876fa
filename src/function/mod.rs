//! The v2-test composition function.
//!
//! Reads `spec.names` and `spec.dataValue` from the observed composite and
//! desires one ConfigMap per name, keyed `v2-test-<name>`, each holding
//! `{<input.keyName>: <dataValue>}`.

mod handler;
pub mod error;
pub mod input;
pub mod reporter;
pub mod synthesize;

pub use error::*;
pub use input::*;
pub use reporter::*;
pub use synthesize::*;

use crate::resource::Scheme;
use crate::sdk::response::DEFAULT_TTL;
use std::time::Duration;

/// Composite field holding the names to render.
pub const NAMES_PATH: &str = "spec.names";
/// Composite field holding the value stored in every rendered ConfigMap.
pub const DATA_VALUE_PATH: &str = "spec.dataValue";

/// A stateless function instance. One value can serve any number of runs.
#[derive(Debug, Clone)]
pub struct Function {
    scheme: Scheme,
    ttl: Duration,
}

impl Default for Function {
    fn default() -> Self {
        Self::new()
    }
}

impl Function {
    pub fn new() -> Self {
        Self {
            scheme: Scheme::core(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Sets the cache TTL advertised on every response.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replaces the scheme used to convert rendered objects.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
