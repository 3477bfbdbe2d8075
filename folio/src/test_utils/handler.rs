// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;
use std::sync::Mutex;

use async_graphql::Value;
use async_trait::async_trait;

use crate::errors::OperationError;
use crate::operations::{Operation, OperationHandler, OperationRequest};

/// Operation handler answering with fixed values and remembering every request.
///
/// Operations without a configured response fail with `NotFound`.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    responses: HashMap<Operation, Value>,
    requests: Mutex<Vec<OperationRequest>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers all requests of an operation with this value.
    pub fn respond(mut self, operation: Operation, value: Value) -> Self {
        self.responses.insert(operation, value);
        self
    }

    /// Returns all requests received so far.
    pub fn requests(&self) -> Vec<OperationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OperationHandler for RecordingHandler {
    async fn handle(&self, request: OperationRequest) -> Result<Value, OperationError> {
        let response = self.responses.get(&request.operation).cloned();
        self.requests.lock().unwrap().push(request);
        response.ok_or(OperationError::NotFound)
    }
}
