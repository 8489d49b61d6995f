//! Request payloads sent to the BLS query service.

use serde::{Deserialize, Serialize};

/// Year the smoke run queries for.
pub const DEFAULT_YEAR: &str = "2017";

/// Payload for `/bigquery_example`. The service expects the year as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub year: String,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_payload_serializes_to_literal() {
        let json = serde_json::to_string(&QueryRequest::default()).unwrap();
        assert_eq!(json, r#"{"year":"2017"}"#);
    }
}
