//! Shared fixtures for webhook tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::config::Settings;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

pub const TEST_URL: &str = "http://example.com/webhook";

/// The record used throughout the tests.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub signup_ts: Option<String>,
    pub tastes: BTreeMap<String, u32>,
}

pub fn user() -> User {
    User {
        id: 1,
        name: "John Doe".to_string(),
        signup_ts: Some("2024-01-01T00:00:00".to_string()),
        tastes: BTreeMap::from([("spicy".to_string(), 5), ("sweet".to_string(), 3)]),
    }
}

pub fn settings() -> Settings {
    Settings::default().with_webhook_url(url::Url::parse(TEST_URL).unwrap())
}

/// Mock HTTP client that returns a configurable sequence of responses
/// and records every request it receives.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(status: http::StatusCode) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            b"response body".to_vec(),
        ))])
    }

    pub fn success() -> Self {
        Self::with_status(http::StatusCode::OK)
    }

    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpClient for MockClient {
    fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

/// Parses a captured request body as JSON.
pub fn json_body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
}
