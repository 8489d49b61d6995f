//! Stateless request builder for the BLS query service.
//!
//! # Design
//! `SmokeClient` holds only a `base_url`. It produces the two requests of a
//! smoke run: the query, carrying a JSON payload, and the fetch, carrying the
//! query response's body untouched. Neither method performs I/O.

use crate::error::RunError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::QueryRequest;

/// Base URL the BLS service listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Endpoint that starts a query and answers with its id.
pub const QUERY_PATH: &str = "/bigquery_example";

/// Endpoint that returns the stored result for a query id.
pub const FETCH_PATH: &str = "/bigquery_example_fetch";

#[derive(Debug, Clone)]
pub struct SmokeClient {
    base_url: String,
}

impl Default for SmokeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SmokeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_query(&self, input: &QueryRequest) -> Result<HttpRequest, RunError> {
        let body = serde_json::to_vec(input)?;
        Ok(self.post(QUERY_PATH, body))
    }

    /// The fetch body is the query response body, byte for byte.
    pub fn build_fetch(&self, query_response: &HttpResponse) -> HttpRequest {
        self.post(FETCH_PATH, query_response.body.clone())
    }

    fn post(&self, path: &str, body: Vec<u8>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers: json_headers(),
            body,
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}
