//! In-memory stand-in for the BLS unemployment query service.
//!
//! Queries are answered from a canned row set instead of BigQuery; each one
//! is stored under a fresh id so `/bigquery_example_fetch` can return it and
//! `/bigquery_example_list` can enumerate it.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const QUERY_PATH: &str = "/bigquery_example";
pub const FETCH_PATH: &str = "/bigquery_example_fetch";
pub const LIST_PATH: &str = "/bigquery_example_list";

/// Oldest year the dataset covers.
pub const MIN_YEAR: i32 = 1900;

/// Stored query results keyed by query id. Ordered so listings are stable.
pub type Store = Arc<RwLock<BTreeMap<String, QueryResult>>>;

/// Body accepted by both the query and the fetch endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BlsRequest {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub queryid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryTicket {
    pub queryid: String,
}

/// One row of the `bls.unemployment_cps` table. Every column but the series
/// id is nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlsRow {
    pub series_id: String,
    pub year: Option<i64>,
    pub period: Option<String>,
    pub value: Option<f64>,
    pub footnote_codes: Option<String>,
    pub date: Option<NaiveDate>,
    pub series_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<BlsRow>,
}

/// Client mistakes, each with the status and text the service answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidContentType,
    MalformedJson,
    InvalidYear,
    MissingQueryId,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Rejection::InvalidContentType => (StatusCode::BAD_REQUEST, "Invalid content type"),
            Rejection::MalformedJson => (StatusCode::INTERNAL_SERVER_ERROR, "Error parsing json"),
            Rejection::InvalidYear => (StatusCode::BAD_REQUEST, "Invalid year"),
            Rejection::MissingQueryId => (StatusCode::BAD_REQUEST, "No queryid provided"),
        };
        (status, message).into_response()
    }
}

/// Starts a query for `year` and answers with its id.
///
/// A year that is not a number between `MIN_YEAR` and the current year is
/// answered 400 `Invalid year`. The BigQuery-backed service answered the same case
/// with 400 `No queryid provided`, a message copied from its fetch handler.
pub async fn query(
    State(store): State<Store>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<QueryTicket>, Rejection> {
    let input = decode(&headers, &body)?;
    if input.year.is_empty() {
        return Err(Rejection::MalformedJson);
    }
    let year = parse_year(&input.year).ok_or(Rejection::InvalidYear)?;

    let queryid = format!("{year}-{}", Uuid::new_v4().simple());
    store.write().await.insert(queryid.clone(), canned_rows(year));
    tracing::info!(%queryid, "stored query result");

    Ok(Json(QueryTicket { queryid }))
}

pub async fn fetch(
    State(store): State<Store>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Rejection> {
    let input = decode(&headers, &body)?;
    if input.queryid.is_empty() {
        return Err(Rejection::MissingQueryId);
    }

    let Some(result) = store.read().await.get(&input.queryid).cloned() else {
        tracing::warn!(queryid = %input.queryid, "query data not available");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    Ok(Json(result).into_response())
}

pub async fn list(State(store): State<Store>) -> Json<Vec<String>> {
    let store = store.read().await;
    Json(store.keys().cloned().collect())
}

fn decode(headers: &HeaderMap, body: &[u8]) -> Result<BlsRequest, Rejection> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if content_type != Some("application/json") {
        return Err(Rejection::InvalidContentType);
    }
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!(error = %err, "rejecting request body");
        Rejection::MalformedJson
    })
}

/// Accepts `MIN_YEAR` through the current calendar year.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|year| (MIN_YEAR..=Utc::now().year()).contains(year))
}

fn canned_rows(year: i32) -> QueryResult {
    let rows = (1..=3u32)
        .map(|month| BlsRow {
            series_id: "LNS14000000".to_string(),
            year: Some(i64::from(year)),
            period: Some(format!("M{month:02}")),
            value: Some(4.4 + f64::from(month) / 10.0),
            footnote_codes: None,
            date: NaiveDate::from_ymd_opt(year, month, 1),
            series_title: Some("(Seas) Unemployment Rate".to_string()),
        })
        .collect();
    QueryResult { rows }
}
