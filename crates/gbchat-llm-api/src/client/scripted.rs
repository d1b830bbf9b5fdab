use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::client::{Transport, TransportError, TransportRequest, TransportResponse};

/// Body of a successful completion whose first choice says `content`
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// In-memory transport that replays queued outcomes in order and records
/// every request it receives. Runs dry with a connection error.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(TransportResponse {
            status,
            body: body.into(),
        }))
    }

    /// Queue a 200 completion replying with `content`.
    pub fn push_reply(&self, content: &str) -> &Self {
        self.push_response(200, completion_body(content))
    }

    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push(Err(error))
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        lock_unpoisoned(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock_unpoisoned(&self.requests).len()
    }

    fn push(&self, outcome: Result<TransportResponse, TransportError>) -> &Self {
        lock_unpoisoned(&self.outcomes).push_back(outcome);
        self
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        lock_unpoisoned(&self.requests).push(request);

        let next = lock_unpoisoned(&self.outcomes).pop_front();
        next.unwrap_or_else(|| Err(TransportError::Connect("no scripted response left".to_string())))
    }
}
