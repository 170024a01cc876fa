//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`-style directives. Module paths are hidden (`with_target(false)`);
//! spans name the work instead.
//!
//! ## What Gets Traced
//!
//! - **Runner lifecycle**: start, shutdown, run counts
//! - **Each run**: a `run_function{tag=..}` span, nested `composite{xr_version xr_kind xr_name}`
//! - **Output**: the rendered names and their count
//! - **Failures**: the full error chain at `warn`
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Runner started handler="Function"
//! INFO run_function: Running function tag="abc"
//! INFO run_function:composite: Added desired configmaps names=["cool-cm-1", "cool-cm-2"] count=2 tag="abc" xr_version="v2.test.crossplane.io/v1" xr_kind="CoolXR" xr_name="test-xr"
//! INFO Run ok handler="Function" tag="abc" conditions=1
//! ```

use super::config::ConfigError;
use tracing_subscriber::EnvFilter;

/// Initializes logging for the process.
///
/// Fails only when `filter` is not a valid set of directives. If a global
/// subscriber is already installed it is kept.
pub fn setup_tracing(filter: &str) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| ConfigError::LogFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false) // Don't show module paths - spans carry the context
        .compact()
        .try_init();
    Ok(())
}
