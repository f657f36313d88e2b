use crate::error::{Error, Result};

use serde::de::DeserializeOwned;
use std::time::Duration;

/// An outgoing JSON POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of an API response, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn into_text(self) -> String {
        self.body
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::Decode)
    }
}

/// The HTTP primitive the client sends through.
///
/// Implementations return the response for every status code and fail only
/// when no response was received.
pub trait Transport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<Response>;
}

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new()
            .user_agent(&format!("parcelvoy-rust/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn post(&self, request: &HttpRequest) -> Result<Response> {
        let mut req = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }

        match req.send_string(&request.body) {
            Ok(resp) => read_response(resp),
            // ureq reports 4xx/5xx as errors; the body is still returned to the caller
            Err(ureq::Error::Status(_, resp)) => read_response(resp),
            Err(ureq::Error::Transport(e)) => Err(Error::Transport(Box::new(e))),
        }
    }
}

fn read_response(resp: ureq::Response) -> Result<Response> {
    let status = resp.status();
    let body = resp.into_string()?;
    Ok(Response { status, body })
}
