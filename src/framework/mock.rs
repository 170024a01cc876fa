//! # Mock Runner
//!
//! Utilities for testing code that talks to a runner, without running a function.
//!
//! Use [`MockRunner`] for a fluent expectation API, or [`create_mock_client`] with
//! [`expect_run`] to answer each request by hand.

use crate::framework::{RunnerClient, RunnerRequest, RunnerStats};
use crate::model::{RunFunctionRequest, RunFunctionResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Respond(RunFunctionResponse),
    /// Drop the response channel, as a runner that crashed mid-run would.
    Drop,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    received: Vec<RunFunctionRequest>,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock runner with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockRunner::new();
/// mock.expect_run().return_response(rsp);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockRunner {
    client: RunnerClient,
    state: Arc<Mutex<MockState>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Creates a new mock runner with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RunnerRequest>(100);
        let state = Arc::new(Mutex::new(MockState::default()));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    RunnerRequest::Run {
                        request,
                        respond_to,
                    } => {
                        let expectation = {
                            let mut state = lock(&task_state);
                            state.received.push(request);
                            state.expectations.pop_front()
                        };
                        match expectation {
                            Some(Expectation::Respond(response)) => {
                                let _ = respond_to.send(response);
                            }
                            Some(Expectation::Drop) => drop(respond_to),
                            None => panic!("Unexpected run request"),
                        }
                    }
                    RunnerRequest::Stats { respond_to } => {
                        let runs = lock(&task_state).received.len() as u64;
                        let _ = respond_to.send(RunnerStats { runs, fatal: 0 });
                    }
                }
            }
        });

        Self {
            client: RunnerClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> RunnerClient {
        self.client.clone()
    }

    /// Expects one more run request.
    pub fn expect_run(&mut self) -> RunExpectationBuilder {
        RunExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Requests received so far, in arrival order.
    pub fn received(&self) -> Vec<RunFunctionRequest> {
        lock(&self.state).received.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder for run expectations.
pub struct RunExpectationBuilder {
    state: Arc<Mutex<MockState>>,
}

impl RunExpectationBuilder {
    /// Answers the run with `response`.
    pub fn return_response(self, response: RunFunctionResponse) {
        lock(&self.state)
            .expectations
            .push_back(Expectation::Respond(response));
    }

    /// Drops the response channel; the caller sees `RunnerDropped`.
    pub fn drop_response(self) {
        lock(&self.state).expectations.push_back(Expectation::Drop);
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests drive the receiver themselves, typically with [`expect_run`], to control
/// exactly when and how each run is answered.
pub fn create_mock_client(buffer_size: usize) -> (RunnerClient, mpsc::Receiver<RunnerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RunnerClient::new(sender), receiver)
}

/// Helper to verify that the next message is a run request
pub async fn expect_run(
    receiver: &mut mpsc::Receiver<RunnerRequest>,
) -> Option<(RunFunctionRequest, oneshot::Sender<RunFunctionResponse>)> {
    match receiver.recv().await {
        Some(RunnerRequest::Run {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::RunnerError;
    use crate::model::RequestMeta;

    fn tagged(tag: &str) -> RunFunctionRequest {
        RunFunctionRequest {
            meta: Some(RequestMeta { tag: tag.into() }),
            ..RunFunctionRequest::default()
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let run_task = tokio::spawn(async move { client.run_function(tagged("t1")).await });

        let (request, responder) = expect_run(&mut receiver).await.expect("Expected Run request");
        assert_eq!(request.tag(), "t1");
        let mut rsp = RunFunctionResponse::default();
        rsp.meta.tag = "t1".into();
        responder.send(rsp.clone()).unwrap();

        assert_eq!(run_task.await.unwrap(), Ok(rsp));
    }

    #[tokio::test]
    async fn test_mock_runner_with_expectations() {
        let mut mock = MockRunner::new();
        mock.expect_run().return_response(RunFunctionResponse::default());
        mock.expect_run().drop_response();

        let client = mock.client();
        assert!(client.run_function(tagged("a")).await.is_ok());
        assert_eq!(
            client.run_function(tagged("b")).await,
            Err(RunnerError::RunnerDropped)
        );

        let tags: Vec<_> = mock.received().iter().map(|r| r.tag().to_string()).collect();
        assert_eq!(tags, vec!["a", "b"]);
        assert_eq!(client.stats().await.unwrap().runs, 2);
        mock.verify();
    }
}
