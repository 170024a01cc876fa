mod common;

use common::{cool_request, request};
use function_v2_test::framework::mock::{create_mock_client, expect_run, MockRunner};
use function_v2_test::framework::{RunnerError, RunnerStats};
use function_v2_test::lifecycle::{FunctionSystem, RunnerConfig};
use function_v2_test::model::{RunFunctionResponse, Status};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_function_system_serves_runs() {
    let config = RunnerConfig {
        ttl: Duration::from_secs(30),
        ..RunnerConfig::default()
    };
    let system = FunctionSystem::start(&config);

    let rsp = system.client.run_function(cool_request()).await.unwrap();
    assert!(!rsp.is_fatal());
    assert_eq!(rsp.meta.ttl, Some(Duration::from_secs(30)));
    assert_eq!(rsp.desired.unwrap().resources.len(), 2);

    let rsp = system
        .client
        .run_function(request("k", json!({"names": ["a"]})))
        .await
        .unwrap();
    assert!(rsp.is_fatal());

    let stats = system.client.stats().await.unwrap();
    assert_eq!(stats, RunnerStats { runs: 2, fatal: 1 });

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_callers_get_their_own_responses() {
    let system = FunctionSystem::start(&RunnerConfig::default());

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = system.client.clone();
        handles.push(tokio::spawn(async move {
            let name = format!("cm-{i}");
            let rsp = client
                .run_function(request("k", json!({"dataValue": "v", "names": [name]})))
                .await
                .unwrap();
            (name, rsp)
        }));
    }

    for handle in handles {
        let (name, rsp) = handle.await.unwrap();
        let resources = rsp.desired.unwrap().resources;
        assert_eq!(resources.len(), 1);
        assert!(resources.contains_key(&format!("v2-test-{name}")));
    }

    assert_eq!(system.client.stats().await.unwrap().runs, 8);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_closed_runner_rejects_runs() {
    let (client, receiver) = create_mock_client(1);
    drop(receiver);

    assert_eq!(
        client.run_function(cool_request()).await.unwrap_err(),
        RunnerError::RunnerClosed
    );
    assert_eq!(client.stats().await.unwrap_err(), RunnerError::RunnerClosed);
}

#[tokio::test]
async fn test_mock_runner_answers_expectations_in_order() {
    let mut mock = MockRunner::new();
    let canned = RunFunctionResponse::default();
    mock.expect_run().return_response(canned.clone());
    mock.expect_run().drop_response();

    let client = mock.client();
    assert_eq!(client.run_function(cool_request()).await.unwrap(), canned);
    assert_eq!(
        client.run_function(cool_request()).await.unwrap_err(),
        RunnerError::RunnerDropped
    );

    assert_eq!(mock.received().len(), 2);
    assert_eq!(mock.received()[0].tag(), "hello");
    mock.verify();
}

#[tokio::test]
async fn test_hand_driven_mock_client() {
    let (client, mut receiver) = create_mock_client(4);

    let caller = tokio::spawn(async move { client.run_function(cool_request()).await });

    let (req, respond_to) = expect_run(&mut receiver).await.unwrap();
    assert_eq!(req, cool_request());
    let rsp = function_v2_test::function::Function::new().run_function(&req);
    respond_to.send(rsp).unwrap();

    let rsp = caller.await.unwrap().unwrap();
    assert_eq!(rsp.conditions[0].status, Status::True);
}
