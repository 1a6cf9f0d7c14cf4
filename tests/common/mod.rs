#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use personnel_client::api::{ApiClient, ApiError, ApiRequest, ApiResult, Transport};
use personnel_client::{ApiEvent, Config, PersonnelApp};
use reqwest::Method;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub const BASE: &str = "http://hr.test/api";

#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16, String),
    Offline(String),
}

/// Keeps every request in send order and answers from canned replies.
///
/// Without a matching rule, GET answers `[]` and writes answer `{}`.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<ApiRequest>>,
    rules: Mutex<Vec<(Method, String, Reply)>>,
}

impl RecordingTransport {
    pub fn reply(&self, method: Method, url_suffix: &str, reply: Reply) {
        self.rules
            .lock()
            .unwrap()
            .push((method, url_suffix.to_string(), reply));
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<ApiRequest> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn answer(&self, request: &ApiRequest) -> ApiResult<String> {
        let rules = self.rules.lock().unwrap();
        let rule = rules
            .iter()
            .find(|(method, suffix, _)| *method == request.method && request.url.ends_with(suffix));

        match rule.map(|(_, _, reply)| reply.clone()) {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status, message)) => Err(ApiError::Status { status, message }),
            Some(Reply::Offline(message)) => Err(ApiError::Other(message)),
            None if request.method == Method::GET => Ok("[]".to_string()),
            None => Ok("{}".to_string()),
        }
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'static, ApiResult<String>> {
        let answer = self.answer(&request);
        self.sent.lock().unwrap().push(request);
        futures::future::ready(answer).boxed()
    }
}

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some("http://hr.test".to_string()),
        _ => None,
    })
}

pub fn client() -> (ApiClient, UnboundedReceiver<ApiEvent>, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let client = ApiClient::with_transport(config(), transport.clone(), tx);
    (client, rx, transport)
}

pub fn app() -> (PersonnelApp, Arc<RecordingTransport>) {
    let (client, rx, transport) = client();
    (PersonnelApp::with_client(client, rx), transport)
}

/// `(METHOD, url)` pairs, for compact assertions.
pub fn targets(requests: &[ApiRequest]) -> Vec<(Method, String)> {
    requests
        .iter()
        .map(|r| (r.method.clone(), r.url.clone()))
        .collect()
}

pub fn get(path: &str) -> (Method, String) {
    (Method::GET, format!("{BASE}{path}"))
}

pub fn refetch() -> Vec<(Method, String)> {
    vec![get("/departments"), get("/employees"), get("/salary-grades")]
}

pub fn body(request: &ApiRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap()
}
