//! Blocking `Transport` backed by ureq.
//!
//! A new agent is built for every request, so no connection outlives its
//! exchange. Status codes, redirects included, are returned as data rather
//! than errors or followed. No timeout is set and bodies are read without a
//! size cap.

use smoke_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use ureq::http::HeaderMap;
use ureq::Agent;

#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn agent(&self) -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent();
        let mut builder = match request.method {
            HttpMethod::Post => agent.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .send(request.body.as_slice())
            .map_err(|err| TransportError::new(&request.url, err))?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|err| TransportError::new(&request.url, err))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// One entry per distinct header name, holding all of its values.
fn collect_headers(map: &HeaderMap) -> Vec<(String, Vec<String>)> {
    map.keys()
        .map(|name| {
            let values = map
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            (name.as_str().to_string(), values)
        })
        .collect()
}
