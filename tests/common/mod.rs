//! Shared helpers: a scripted upstream served on an ephemeral port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;

/// What the stub upstream answers to every request
#[derive(Clone)]
pub enum StubReply {
    /// 200 with the given body and a JSON content type
    Json(String),
    /// Arbitrary status and body
    Status(u16, String),
    /// 200 JSON, but only after the delay
    Slow(Duration, String),
    /// 302 pointing at the given location
    Redirect(String),
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    hits: Arc<AtomicUsize>,
    uris: Arc<Mutex<Vec<String>>>,
}

pub struct StubUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    uris: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    pub async fn spawn(reply: StubReply) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let uris = Arc::new(Mutex::new(Vec::new()));

        let state = StubState {
            reply,
            hits: hits.clone(),
            uris: uris.clone(),
        };
        let router = Router::new().fallback(stub_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            uris,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Path and query of every request received, in arrival order
    pub fn uris(&self) -> Vec<String> {
        self.uris.lock().unwrap().clone()
    }
}

async fn stub_handler(State(state): State<StubState>, uri: Uri) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.uris.lock().unwrap().push(uri.to_string());

    match state.reply {
        StubReply::Json(body) => json_response(StatusCode::OK, body),
        StubReply::Status(code, body) => {
            let status = StatusCode::from_u16(code).unwrap();
            json_response(status, body)
        }
        StubReply::Slow(delay, body) => {
            tokio::time::sleep(delay).await;
            json_response(StatusCode::OK, body)
        }
        StubReply::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
    }
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Base URL of a port nothing is listening on
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Six records shaped like a real `Elspotprices` response
pub fn fixture_body() -> String {
    json!({
        "total": 6,
        "limit": 100,
        "dataset": "Elspotprices",
        "records": [
            { "HourDKM": null, "PriceArea": "DK1", "SpotPriceDKK": "108.500000", "SpotPriceEUR": "14.570000" },
            { "HourDKM": null, "PriceArea": "DK2", "SpotPriceDKK": "0.740000", "SpotPriceEUR": "0.100000" },
            { "HourDKM": null, "PriceArea": "NO2", "SpotPriceDKK": "111.779999", "SpotPriceEUR": "15.010000" },
            { "HourDKM": null, "PriceArea": "SE3", "SpotPriceDKK": "0.740000", "SpotPriceEUR": "0.100000" },
            { "HourDKM": null, "PriceArea": "SE4", "SpotPriceDKK": "0.740000", "SpotPriceEUR": "0.100000" },
            { "HourDKM": null, "PriceArea": "SYSTEM", "SpotPriceDKK": "14.220000", "SpotPriceEUR": "1.910000" }
        ]
    })
    .to_string()
}

/// Prices as the live API sends them: JSON numbers, and `null` for hours
/// without a price
pub fn numeric_body() -> String {
    r#"{"total":2,"limit":100,"dataset":"Elspotprices","records":[
        {"HourDKM":null,"PriceArea":"DK1","SpotPriceDKK":1033.170044,"SpotPriceEUR":138.500000},
        {"HourDKM":null,"PriceArea":"DK2","SpotPriceDKK":null,"SpotPriceEUR":null}
    ]}"#
    .to_string()
}

/// A body with `count` records whose DKK price encodes the position
pub fn numbered_body(count: usize) -> String {
    let records: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "HourDKM": null,
                "PriceArea": if i % 2 == 0 { "DK1" } else { "DK2" },
                "SpotPriceDKK": format!("{}.000000", i),
                "SpotPriceEUR": format!("{}.500000", i),
            })
        })
        .collect();

    json!({ "total": count, "limit": count, "dataset": "Elspotprices", "records": records })
        .to_string()
}
