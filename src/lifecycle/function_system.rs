use super::config::RunnerConfig;
use crate::framework::{FunctionHandler, FunctionRunner, RunnerClient, RunnerError};
use crate::function::Function;
use tracing::{error, info};

/// Owns a running [`FunctionRunner`] and the client used to reach it.
///
/// # Example
///
/// ```ignore
/// let system = FunctionSystem::start(&RunnerConfig::from_env()?);
/// let rsp = system.client.run_function(req).await?;
/// system.shutdown().await?;
/// ```
pub struct FunctionSystem {
    /// Client for submitting runs. Clone it freely.
    pub client: RunnerClient,

    /// Task handle for the runner (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl FunctionSystem {
    /// Starts a runner serving the v2-test [`Function`] with the configured TTL.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(config: &RunnerConfig) -> Self {
        Self::with_handler(config, Function::new().with_ttl(config.ttl))
    }

    /// Starts a runner serving any handler.
    pub fn with_handler<H: FunctionHandler>(config: &RunnerConfig, handler: H) -> Self {
        let (runner, client) = FunctionRunner::new(config.channel_capacity, handler);
        let handle = tokio::spawn(runner.run());
        Self { client, handle }
    }

    /// Gracefully shuts down the runner.
    ///
    /// Drops this system's client and waits for the runner to drain. Clones of the
    /// client handed out earlier keep the runner alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), RunnerError> {
        info!("Shutting down function runner...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Runner task failed: {:?}", e);
            return Err(RunnerError::TaskFailed(e.to_string()));
        }

        info!("Function runner shutdown complete.");
        Ok(())
    }
}
