#![allow(dead_code)]

use parcelvoy::{HttpRequest, Options, Response, Result, Transport};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const ENDPOINT: &str = "https://parcelvoy.example.com/api";
pub const API_KEY: &str = "pk_test_123";

/// Transport that keeps every request and answers with a canned response.
#[derive(Clone)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    status: u16,
    body: String,
}

impl Recorder {
    pub fn new() -> Self {
        Self::replying(202, "")
    }

    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body: body.to_string(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub fn last_json(&self) -> Value {
        serde_json::from_str(&self.last().body).unwrap()
    }
}

impl Transport for Recorder {
    fn post(&self, request: &HttpRequest) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Response {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn options() -> Options {
    Options::new(API_KEY, ENDPOINT)
}
