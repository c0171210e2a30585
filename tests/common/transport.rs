//! In-memory transport with scripted responses

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use wedding_quiz::client::{ApiRequest, Method, RawResponse, Transport};
use wedding_quiz::core::SyncError;

#[derive(Clone)]
enum Scripted {
    Respond(RawResponse),
    Fail(String),
}

type Route = (Method, String);

/// Records every request and answers from per-route scripts
///
/// One-shot responses are used first, in order; after that the route's
/// standing response applies. Unscripted routes answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<ApiRequest>>,
    queued: Mutex<HashMap<Route, VecDeque<Scripted>>>,
    standing: Mutex<HashMap<Route, Scripted>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers the next matching request once
    pub fn respond_once(&self, method: Method, path: &str, status: u16, body: Value) {
        self.queued
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Scripted::Respond(raw(status, body)));
    }

    /// Answers every matching request not covered by a one-shot response
    pub fn respond_always(&self, method: Method, path: &str, status: u16, body: Value) {
        self.standing
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Scripted::Respond(raw(status, body)));
    }

    /// Fails the next matching request as if the network were down
    pub fn fail_once(&self, method: Method, path: &str, message: &str) {
        self.queued
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Scripted::Fail(message.to_string()));
    }

    /// Fails every matching request not covered by a one-shot response
    pub fn fail_always(&self, method: Method, path: &str, message: &str) {
        self.standing
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Scripted::Fail(message.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    /// Body of the most recent request to `path`
    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|request| request.path == path)
            .and_then(|request| request.body.clone())
    }

    fn next_script(&self, route: &Route) -> Option<Scripted> {
        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(route)
            .and_then(VecDeque::pop_front);
        queued.or_else(|| self.standing.lock().unwrap().get(route).cloned())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SyncError> {
        let route = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);
        match self.next_script(&route) {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(SyncError::Transport(message)),
            None => Ok(raw(404, json!({ "error": "Not found" }))),
        }
    }
}

fn raw(status: u16, body: Value) -> RawResponse {
    RawResponse { status, body: body.to_string() }
}
