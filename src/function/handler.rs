//! Serving [`Function`] from a [`FunctionRunner`](crate::framework::FunctionRunner).

use super::Function;
use crate::framework::FunctionHandler;
use crate::model::{RunFunctionRequest, RunFunctionResponse};
use async_trait::async_trait;

#[async_trait]
impl FunctionHandler for Function {
    async fn handle(&self, req: RunFunctionRequest) -> RunFunctionResponse {
        self.run_function(&req)
    }
}
