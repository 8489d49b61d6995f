//! Synchronous smoke-run core for the BLS query service.
//!
//! # Overview
//! Posts a year to `/bigquery_example`, prints the reply, then posts that
//! reply's body unchanged to `/bigquery_example_fetch` and prints the second
//! reply. Request building and report rendering never touch the network; the
//! host supplies a `Transport` that does the round-trips.
//!
//! # Design
//! - `SmokeClient` is stateless and holds only `base_url`.
//! - `run` drives the fixed two-step order over any `Transport`.
//! - Bodies are `Vec<u8>` end to end so the echoed body survives intact.

pub mod client;
pub mod error;
pub mod http;
pub mod report;
pub mod runner;
pub mod types;

pub use client::{SmokeClient, DEFAULT_BASE_URL, FETCH_PATH, QUERY_PATH};
pub use error::{BoxError, RunError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use report::write_response;
pub use runner::{run, RunReport, Transport};
pub use types::{QueryRequest, DEFAULT_YEAR};
