//! The two-step smoke sequence.
//!
//! # Design
//! `run` is generic over a `Transport` so the host picks the HTTP client and
//! tests can drive it with an in-memory fake. The order is fixed: query sent,
//! query response received and printed, fetch built from that response, fetch
//! sent, fetch response printed. A transport failure returns immediately, so
//! the fetch is never attempted after a failed query.

use std::io::Write;

use crate::client::SmokeClient;
use crate::error::{RunError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::report::write_response;
use crate::types::QueryRequest;

/// Executes one blocking HTTP round-trip.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Both responses of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub query: HttpResponse,
    pub fetch: HttpResponse,
}

pub fn run<T, W>(
    client: &SmokeClient,
    transport: &mut T,
    out: &mut W,
) -> Result<RunReport, RunError>
where
    T: Transport + ?Sized,
    W: Write,
{
    let query = round_trip(transport, &client.build_query(&QueryRequest::default())?)?;
    write_response(out, &query)?;

    let fetch = round_trip(transport, &client.build_fetch(&query))?;
    write_response(out, &fetch)?;

    Ok(RunReport { query, fetch })
}

fn round_trip<T>(transport: &mut T, request: &HttpRequest) -> Result<HttpResponse, TransportError>
where
    T: Transport + ?Sized,
{
    tracing::debug!(
        method = request.method.as_str(),
        url = %request.url,
        bytes = request.body.len(),
        "sending request"
    );
    let response = transport.execute(request).inspect_err(|err| {
        tracing::error!(url = %request.url, error = %err, "request failed");
    })?;
    tracing::info!(
        url = %request.url,
        status = response.status,
        bytes = response.body.len(),
        "received response"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays canned outcomes in order and records every request it saw.
    struct FakeTransport {
        outcomes: VecDeque<Result<HttpResponse, TransportError>>,
        seen: Vec<HttpRequest>,
    }

    impl FakeTransport {
        fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                outcomes: outcomes.into(),
                seen: Vec::new(),
            }
        }
    }

    impl Transport for FakeTransport {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.push(request.clone());
            self.outcomes
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new(&request.url, "no outcome scripted")))
        }
    }

    fn ok(status: u16, body: &[u8]) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: vec![("content-type".to_string(), vec!["application/json".to_string()])],
            body: body.to_vec(),
        })
    }

    fn client() -> SmokeClient {
        SmokeClient::new("http://localhost:8080")
    }

    #[test]
    fn fetch_body_is_query_response_body() {
        let rows = br#"{"rows":[{"year":"2017","count":5}]}"#;
        let mut transport = FakeTransport::new(vec![ok(200, rows), ok(200, b"done")]);
        let mut out = Vec::new();

        let report = run(&client(), &mut transport, &mut out).unwrap();

        assert_eq!(transport.seen.len(), 2);
        assert!(transport.seen[0].url.ends_with("/bigquery_example"));
        assert!(transport.seen[1].url.ends_with("/bigquery_example_fetch"));
        assert_eq!(transport.seen[1].body, rows.to_vec());
        assert_eq!(report.query.body, rows.to_vec());
        assert_eq!(report.fetch.body, b"done".to_vec());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Code: 200").count(), 2);
    }

    #[test]
    fn query_payload_is_year_2017() {
        let mut transport = FakeTransport::new(vec![ok(200, b"{}"), ok(200, b"{}")]);
        run(&client(), &mut transport, &mut Vec::new()).unwrap();

        let body: serde_json::Value = serde_json::from_slice(&transport.seen[0].body).unwrap();
        assert_eq!(body, serde_json::json!({ "year": "2017" }));
    }

    #[test]
    fn content_type_is_sent_on_both_requests() {
        let mut transport = FakeTransport::new(vec![ok(200, b"x"), ok(200, b"y")]);
        run(&client(), &mut transport, &mut Vec::new()).unwrap();

        for request in &transport.seen {
            assert!(request
                .headers
                .iter()
                .any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v == "application/json"));
        }
    }

    #[test]
    fn failed_query_never_sends_fetch() {
        let mut transport = FakeTransport::new(vec![Err(TransportError::new(
            "http://localhost:8080/bigquery_example",
            "connection refused",
        ))]);
        let mut out = Vec::new();

        let err = run(&client(), &mut transport, &mut out).unwrap_err();

        assert!(matches!(err, RunError::Transport(_)));
        assert_eq!(transport.seen.len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn failed_fetch_keeps_first_report_printed() {
        let mut transport = FakeTransport::new(vec![
            ok(200, b"{\"queryid\":\"2017-1\"}"),
            Err(TransportError::new("http://localhost:8080/bigquery_example_fetch", "reset")),
        ]);
        let mut out = Vec::new();

        let err = run(&client(), &mut transport, &mut out).unwrap_err();

        match err {
            RunError::Transport(inner) => assert!(inner.url.ends_with("_fetch")),
            other => panic!("unexpected error: {other}"),
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Code: 200").count(), 1);
    }

    #[test]
    fn error_status_is_printed_not_raised() {
        let mut transport = FakeTransport::new(vec![
            ok(400, b"Invalid year"),
            ok(500, b"Error parsing json"),
        ]);
        let mut out = Vec::new();

        let report = run(&client(), &mut transport, &mut out).unwrap();

        assert_eq!(report.query.status, 400);
        assert_eq!(report.fetch.status, 500);
        assert_eq!(transport.seen[1].body, b"Invalid year".to_vec());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Code: 400\n"));
        assert!(text.contains("Code: 500\n"));
    }
}
