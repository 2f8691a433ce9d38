#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use fixture_probe::error::TransportError;
use fixture_probe::fetch::JsonSource;
use serde_json::Value;

/// Canned upstream: endpoint -> payload or http status. Unknown endpoints
/// answer 404. Every request is recorded with its query.
#[derive(Default)]
pub struct FakeSource {
    payloads: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, endpoint: &str, payload: Value) -> Self {
        self.payloads.insert(endpoint.to_string(), payload);
        self
    }

    pub fn failing(mut self, endpoint: &str, status: u16) -> Self {
        self.failures.insert(endpoint.to_string(), status);
        self
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(e, _)| e.clone()).collect()
    }

    pub fn query_for(&self, endpoint: &str) -> Option<Vec<(String, String)>> {
        self.calls
            .borrow()
            .iter()
            .find(|(e, _)| e == endpoint)
            .map(|(_, q)| q.clone())
    }
}

impl JsonSource for FakeSource {
    fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        self.calls.borrow_mut().push((
            endpoint.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        if let Some(status) = self.failures.get(endpoint) {
            return Err(TransportError::Status {
                url: endpoint.to_string(),
                status: *status,
                snippet: "fake failure".to_string(),
            });
        }
        self.payloads
            .get(endpoint)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: endpoint.to_string(),
                status: 404,
                snippet: "not found".to_string(),
            })
    }
}

pub fn read_fixture(name: &str) -> Value {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    let raw = std::fs::read_to_string(path).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a fmt subscriber with `filter` and returns what it printed.
pub fn logged_at<T>(filter: &str, f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&buffer.0.lock().expect("log buffer")).into_owned();
    (out, text)
}
