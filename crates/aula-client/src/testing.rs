//! Scripted transport for unit tests: canned responses, recorded requests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::{Method, RawResponse, Transport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<RawResponse>>,
    routes: Mutex<HashMap<(String, String), RawResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request, whatever it is.
    pub fn push_json(&self, status: u16, body: Value) {
        self.queue.lock().unwrap().push_back(RawResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        });
    }

    /// Fix the response for a (method, path) pair; takes priority over the
    /// queue and can be hit any number of times.
    pub fn route_json(&self, method: &str, path: &str, status: u16, body: Value) {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            RawResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            },
        );
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<RawResponse, ClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.as_str(),
            path: path.to_string(),
            query: query.to_vec(),
            body,
        });

        if let Some(response) = self
            .routes
            .lock()
            .unwrap()
            .get(&(method.as_str().to_string(), path.to_string()))
        {
            return Ok(response.clone());
        }

        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Network("no scripted response left".to_string()))
    }
}
