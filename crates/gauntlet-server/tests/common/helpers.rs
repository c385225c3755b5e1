use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use gauntlet_primitives::{
    events::AuctionBroadcastData, AuctionEvent, DepositRequest,
};
use serde_json::Value;
use tokio::{sync::broadcast::Receiver, time::timeout};
use tower::util::ServiceExt;

pub use gauntlet_server::routes::MAX_BODY_SIZE;

pub fn json_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub async fn submit_deposit(app: Router, deposit: &DepositRequest) -> Response<Body> {
    let body = serde_json::to_string(deposit).unwrap();
    app.oneshot(json_request("/deposit", body)).await.unwrap()
}

pub async fn submit_bid(app: Router, bid: &Value) -> Response<Body> {
    app.oneshot(json_request("/bid", bid.to_string())).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), MAX_BODY_SIZE).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn next_event(events: &mut Receiver<AuctionEvent>) -> AuctionEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for an auction event")
        .expect("event channel closed")
}

/// Skip events until an auction is announced.
pub async fn next_announcement(events: &mut Receiver<AuctionEvent>) -> AuctionBroadcastData {
    loop {
        if let AuctionEvent::Deposit(announcement) = next_event(events).await {
            return announcement;
        }
    }
}
