//! A scripted [`Transport`] for tests.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use anyhow::anyhow;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Method, StatusCode, Transport};
use crate::ClientError;

#[derive(Debug, Clone)]
enum Reply {
    Respond(StatusCode, Value),
    Offline,
}

/// Answers requests from a table of `(method, path)` routes and records every request.
///
/// Unscripted routes answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), (Reply, Duration)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.script(method, path, Reply::Respond(status_code(status), body), Duration::ZERO)
    }

    pub fn respond_after(
        &self,
        method: Method,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) -> &Self {
        self.script(method, path, Reply::Respond(status_code(status), body), delay)
    }

    /// Make a route fail as if the server could not be reached.
    pub fn offline(&self, method: Method, path: &str) -> &Self {
        self.script(method, path, Reply::Offline, Duration::ZERO)
    }

    fn script(&self, method: Method, path: &str, reply: Reply, delay: Duration) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.trim_start_matches('/').to_string()), (reply, delay));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap()
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let scripted = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method.clone(), request.path.clone()))
            .cloned();
        self.requests.lock().unwrap().push(request);

        let Some((reply, delay)) = scripted else {
            return Ok(ApiResponse::new(StatusCode::NOT_FOUND, Value::Null));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Respond(status, body) => Ok(ApiResponse::new(status, body)),
            Reply::Offline => Err(anyhow!("error sending request: connection refused")),
        }
    }
}
