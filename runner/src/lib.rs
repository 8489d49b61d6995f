//! Blocking host for the smoke run: a ureq transport plus the entry point
//! the `bls-smoke` binary calls.

use std::io::Write;

use smoke_core::{RunError, RunReport, SmokeClient};

pub mod transport;

pub use transport::UreqTransport;

/// Runs the query/fetch sequence against `base_url` over real HTTP and
/// prints both responses to `out`.
pub fn smoke<W: Write>(base_url: &str, out: &mut W) -> Result<RunReport, RunError> {
    let client = SmokeClient::new(base_url);
    tracing::info!(base_url = client.base_url(), "starting smoke run");
    smoke_core::run(&client, &mut UreqTransport, out)
}
