use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;

const ERROR_SNIPPET_CHARS: usize = 220;
// Ceiling only; each source sets its own per-request timeout.
const CLIENT_TIMEOUT_SECS: u64 = 120;
const USER_AGENT: &str = "fixture-probe/0.1";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn shared_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}

pub trait JsonSource {
    fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, TransportError>;
}

pub struct HttpJsonSource {
    client: &'static Client,
    base_url: String,
    timeout: Duration,
    fixed_query: Vec<(String, String)>,
}

impl HttpJsonSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: shared_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            fixed_query: Vec::new(),
        })
    }

    pub fn with_query_param(mut self, key: &str, value: &str) -> Self {
        self.fixed_query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_matches('/'))
    }
}

impl JsonSource for HttpJsonSource {
    fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, ?query, "GET");

        let resp = self
            .client
            .get(&url)
            .query(&self.fixed_query)
            .query(query)
            .timeout(self.timeout)
            .send()
            .map_err(|err| TransportError::Request {
                url: url.clone(),
                message: err.to_string(),
            })?;
        let status = resp.status();
        let body = resp.text().map_err(|err| TransportError::Request {
            url: url.clone(),
            message: format!("failed reading body: {err}"),
        })?;
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        serde_json::from_str(body.trim()).map_err(|err| TransportError::InvalidJson {
            url,
            message: err.to_string(),
        })
    }
}

fn snippet(body: &str) -> String {
    body.trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(ERROR_SNIPPET_CHARS)
        .collect()
}
