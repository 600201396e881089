//! In-process order API for tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ApiState {
    meal_fetches: Arc<AtomicUsize>,
    order_posts: Arc<AtomicUsize>,
    last_order: Arc<Mutex<Option<Value>>>,
}

/// Handle to a running test API.
pub(crate) struct TestApi {
    pub addr: SocketAddr,
    pub meal_fetches: Arc<AtomicUsize>,
    pub order_posts: Arc<AtomicUsize>,
    last_order: Arc<Mutex<Option<Value>>>,
}

impl TestApi {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Body of the most recent accepted order.
    pub fn last_order(&self) -> Option<Value> {
        self.last_order.lock().unwrap().clone()
    }
}

async fn meals(State(state): State<ApiState>) -> Json<Value> {
    state.meal_fetches.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        { "id": "m1", "name": "Mac & Cheese", "price": "8.99", "description": "Creamy", "image": "images/mac.jpg" },
        { "id": "m2", "name": "Burger", "price": 12.99, "description": "Juicy", "image": "images/burger.jpg" }
    ]))
}

async fn orders(State(state): State<ApiState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.order_posts.fetch_add(1, Ordering::SeqCst);

    let has_items = body["order"]["items"]
        .as_array()
        .is_some_and(|items| !items.is_empty());
    if !has_items {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Missing data." })));
    }

    *state.last_order.lock().unwrap() = Some(body);
    (StatusCode::CREATED, Json(json!({ "message": "Order created!" })))
}

async fn gold() -> Json<Value> {
    Json(json!([{ "id": "m1", "name": "Gold", "price": 100000000000000000u64 }]))
}

async fn out_of_stock() -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": "out of stock" })))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

/// Starts the API on an ephemeral port.
pub(crate) async fn spawn_order_api() -> std::io::Result<TestApi> {
    // Keep reqwest from routing loopback traffic through a proxy.
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let state = ApiState::default();
    let app = Router::new()
        .route("/meals", get(meals))
        .route("/orders", post(orders))
        .route("/stock", post(out_of_stock))
        .route("/gold", get(gold))
        .route("/broken", get(broken))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestApi {
        addr,
        meal_fetches: state.meal_fetches,
        order_posts: state.order_posts,
        last_order: state.last_order,
    })
}

/// A URL nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/meals", addr)
}
