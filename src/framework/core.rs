//! # Core Runner
//!
//! This module defines the generic building blocks for serving a function.
//!
//! ## Key Types
//!
//! - [`FunctionHandler`]: The trait a function implements to be served.
//! - [`FunctionRunner`]: The actor that feeds requests to a handler.
//! - [`RunnerClient`]: The client for submitting requests to the runner.
//! - [`RunnerError`]: Plumbing errors (runner gone, response dropped).

use crate::model::{RunFunctionRequest, RunFunctionResponse};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any function must implement to be served by [`FunctionRunner`].
///
/// A handler never fails a run at this level: whatever goes wrong is reported
/// inside the returned response, as conditions and results.
#[async_trait]
pub trait FunctionHandler: Send + Sync + 'static {
    async fn handle(&self, req: RunFunctionRequest) -> RunFunctionResponse;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the runner plumbing itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RunnerError {
    #[error("Runner closed")]
    RunnerClosed,
    #[error("Runner dropped response channel")]
    RunnerDropped,
    #[error("Runner task failed: {0}")]
    TaskFailed(String),
}

/// Counters kept by a runner over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerStats {
    pub runs: u64,
    pub fatal: u64,
}

/// Message sent to the runner.
#[derive(Debug)]
pub enum RunnerRequest {
    Run {
        request: RunFunctionRequest,
        respond_to: oneshot::Sender<RunFunctionResponse>,
    },
    Stats {
        respond_to: oneshot::Sender<RunnerStats>,
    },
}

// =============================================================================
// 3. THE RUNNER SERVER
// =============================================================================

/// The actor that owns a handler and the receiving end of the request channel.
///
/// Requests are handled one at a time, in arrival order. Handlers are stateless
/// between runs, so callers that need more throughput start more runners.
pub struct FunctionRunner<H: FunctionHandler> {
    receiver: mpsc::Receiver<RunnerRequest>,
    handler: H,
    stats: RunnerStats,
}

impl<H: FunctionHandler> FunctionRunner<H> {
    pub fn new(buffer_size: usize, handler: H) -> (Self, RunnerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let runner = Self {
            receiver,
            handler,
            stats: RunnerStats::default(),
        };
        (runner, RunnerClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        // Just the type name, e.g. "Function" rather than the full path.
        let handler = std::any::type_name::<H>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(handler, "Runner started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RunnerRequest::Run {
                    request,
                    respond_to,
                } => {
                    let tag = request.tag().to_string();
                    debug!(handler, %tag, "Run");
                    let response = self.handler.handle(request).await;
                    self.stats.runs += 1;
                    if response.is_fatal() {
                        self.stats.fatal += 1;
                        warn!(handler, %tag, results = response.results.len(), "Run fatal");
                    } else {
                        info!(handler, %tag, conditions = response.conditions.len(), "Run ok");
                    }
                    let _ = respond_to.send(response);
                }
                RunnerRequest::Stats { respond_to } => {
                    let _ = respond_to.send(self.stats);
                }
            }
        }

        info!(handler, runs = self.stats.runs, fatal = self.stats.fatal, "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A cloneable handle for submitting runs to a [`FunctionRunner`].
#[derive(Clone)]
pub struct RunnerClient {
    sender: mpsc::Sender<RunnerRequest>,
}

impl RunnerClient {
    pub fn new(sender: mpsc::Sender<RunnerRequest>) -> Self {
        Self { sender }
    }

    pub async fn run_function(
        &self,
        request: RunFunctionRequest,
    ) -> Result<RunFunctionResponse, RunnerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RunnerRequest::Run { request, respond_to })
            .await
            .map_err(|_| RunnerError::RunnerClosed)?;
        response.await.map_err(|_| RunnerError::RunnerDropped)
    }

    pub async fn stats(&self) -> Result<RunnerStats, RunnerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RunnerRequest::Stats { respond_to })
            .await
            .map_err(|_| RunnerError::RunnerClosed)?;
        response.await.map_err(|_| RunnerError::RunnerDropped)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
