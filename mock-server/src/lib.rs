//! Mock HTTP services for exercising the smoke runner.
//!
//! - [`app`] is a stand-in for the BLS query service: it validates requests
//!   the way the real service does and keeps results in memory.
//! - [`scripted`] replies from a fixed script and journals every request.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub mod bls;
pub mod scripted;

pub use bls::{
    BlsRequest, BlsRow, QueryResult, QueryTicket, Rejection, Store, FETCH_PATH, LIST_PATH,
    QUERY_PATH,
};
pub use scripted::{scripted, Journal, RecordedRequest, Script};

pub fn app() -> Router {
    let store: Store = Arc::new(RwLock::new(Default::default()));
    Router::new()
        .route(QUERY_PATH, post(bls::query))
        .route(FETCH_PATH, post(bls::fetch))
        .route(LIST_PATH, get(bls::list).post(bls::list))
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}
