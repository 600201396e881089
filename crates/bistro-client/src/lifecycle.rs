//! # Request Lifecycle
//!
//! Observable loading / data / error state around one category of request.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RequestLifecycle States                            │
//! │                                                                         │
//! │              trigger(payload?)                                          │
//! │  ┌────────┐ ─────────────────► ┌───────────────┐                        │
//! │  │ Idle   │   is_loading=true  │   In flight   │                        │
//! │  │        │   (synchronously)  │ (tokio task)  │                        │
//! │  └────────┘                    └───────┬───────┘                        │
//! │      ▲                       success   │   failure                      │
//! │      │                     ┌───────────┴───────────┐                    │
//! │      │                     ▼                       ▼                    │
//! │      │            data = body            error = message                │
//! │      │            error = None           data untouched                 │
//! │      │                     └───────────┬───────────┘                    │
//! │      └──────────── is_loading = false ─┘  (exactly once)                │
//! │                                                                         │
//! │  AUTO-TRIGGER: read requests (GET / no method) fire once at creation   │
//! │  and again only when set_request() gets a structurally different       │
//! │  (url, config). Mutating requests only fire on explicit trigger().     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Triggers
//! Triggers are not cancelled or sequenced. If a second trigger starts
//! before the first settles, both run and the last one to settle decides
//! `data`, `error` and `is_loading`. The first settlement can therefore
//! report `is_loading = false` while the second is still in flight.
//! There is no timeout; a stalled request keeps `is_loading` true until the
//! transport gives up.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::{send_http_request, HttpRequest, RequestConfig};

// =============================================================================
// Request State
// =============================================================================

/// What observers of a lifecycle see.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    /// Last successful response body, or the initial value.
    pub data: T,

    /// True strictly between a request's start and its settlement.
    pub is_loading: bool,

    /// Message of the last failure.
    pub error: Option<String>,
}

impl<T> RequestState<T> {
    fn new(data: T) -> Self {
        RequestState {
            data,
            is_loading: false,
            error: None,
        }
    }
}

// =============================================================================
// Request Lifecycle
// =============================================================================

/// Wraps one endpoint with a uniform loading / data / error state.
///
/// Must be created inside a Tokio runtime; requests run as tasks on it.
/// Clones share both the state and the targeted request, so a
/// `set_request` through one handle redirects every clone.
#[derive(Clone, Debug)]
pub struct RequestLifecycle<T> {
    client: reqwest::Client,
    request: Arc<Mutex<HttpRequest>>,
    initial: T,
    state: Arc<watch::Sender<RequestState<T>>>,
    runtime: Handle,
}

impl<T> RequestLifecycle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a lifecycle, triggering it immediately if the request only
    /// reads.
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        config: RequestConfig,
        initial: T,
    ) -> ClientResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ClientError::NoRuntime)?;
        let (state, _) = watch::channel(RequestState::new(initial.clone()));
        let request = HttpRequest::new(url, config);

        let lifecycle = RequestLifecycle {
            client,
            request: Arc::new(Mutex::new(request.clone())),
            initial,
            state: Arc::new(state),
            runtime,
        };

        if request.config.is_read() {
            lifecycle.start(request, None);
        }

        Ok(lifecycle)
    }

    /// Starts the request in the background.
    ///
    /// `is_loading` is already true when this returns. The handle resolves
    /// once the request has settled; dropping it does not cancel anything.
    pub fn trigger(&self, payload: Option<Value>) -> JoinHandle<()> {
        self.start(self.request(), payload)
    }

    /// Runs the request and waits for it to settle.
    pub async fn send(&self, payload: Option<Value>) -> RequestState<T> {
        let request = self.request();
        mark_loading(&self.state, &request);
        let result = run_request::<T>(&self.runtime, self.client.clone(), request.clone(), payload).await;
        settle(&self.state, &request, result);
        self.state()
    }

    /// Points the lifecycle at a new (url, config) pair.
    ///
    /// A structurally equal pair is ignored. A different one replaces the
    /// request for every clone and, for reads, triggers it. Requests already
    /// in flight keep their old target. Returns whether it changed.
    pub fn set_request(&self, url: impl Into<String>, config: RequestConfig) -> bool {
        let next = HttpRequest::new(url, config);
        {
            let mut current = self.lock_request();
            if *current == next {
                debug!(url = %next.url, "Request unchanged, not re-triggering");
                return false;
            }
            *current = next.clone();
        }

        if next.config.is_read() {
            self.start(next, None);
        }
        true
    }

    /// Resets `data` to the initial value. Loading and error are kept.
    pub fn clear(&self) {
        let initial = self.initial.clone();
        self.state.send_modify(|s| s.data = initial);
    }

    /// Current state snapshot.
    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn data(&self) -> T {
        self.state.borrow().data.clone()
    }

    /// The request this lifecycle currently targets.
    pub fn request(&self) -> HttpRequest {
        self.lock_request().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Waits until nothing is in flight and returns the state.
    pub async fn settled(&self) -> RequestState<T> {
        let mut rx = self.subscribe();
        // The sender lives in self, so the channel cannot close while waiting.
        let _ = rx.wait_for(|s| !s.is_loading).await;
        self.state()
    }

    fn start(&self, request: HttpRequest, payload: Option<Value>) -> JoinHandle<()> {
        mark_loading(&self.state, &request);

        let client = self.client.clone();
        let runtime = self.runtime.clone();
        let state = Arc::clone(&self.state);

        self.runtime.spawn(async move {
            let result = run_request::<T>(&runtime, client, request.clone(), payload).await;
            settle(&state, &request, result);
        })
    }

    fn lock_request(&self) -> MutexGuard<'_, HttpRequest> {
        self.request.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Performs the request on its own task.
///
/// A panic while sending or decoding surfaces as `ClientError::Aborted`, so
/// the caller can always settle the lifecycle.
async fn run_request<T>(
    runtime: &Handle,
    client: reqwest::Client,
    request: HttpRequest,
    payload: Option<Value>,
) -> ClientResult<T>
where
    T: DeserializeOwned + Send + 'static,
{
    runtime
        .spawn(async move { send_http_request::<T>(&client, &request, payload.as_ref()).await })
        .await?
}

fn mark_loading<T>(state: &watch::Sender<RequestState<T>>, request: &HttpRequest) {
    debug!(method = %request.config.method(), url = %request.url, "Request started");
    state.send_modify(|s| s.is_loading = true);
}

fn settle<T>(
    state: &watch::Sender<RequestState<T>>,
    request: &HttpRequest,
    result: ClientResult<T>,
) {
    match result {
        Ok(data) => {
            info!(method = %request.config.method(), url = %request.url, "Request succeeded");
            state.send_modify(|s| {
                s.data = data;
                s.error = None;
                s.is_loading = false;
            });
        }
        Err(err) => {
            let message = err.user_message();
            warn!(
                method = %request.config.method(),
                url = %request.url,
                retryable = err.is_retryable(),
                error = %message,
                "Request failed"
            );
            state.send_modify(|s| {
                s.error = Some(message);
                s.is_loading = false;
            });
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_REQUEST_MESSAGE;
    use crate::test_support::{spawn_order_api, unreachable_url};
    use bistro_core::MenuItem;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[tokio::test]
    async fn read_request_triggers_once_on_creation() {
        let api = spawn_order_api().await.expect("spawn server");

        let meals = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            api.url("/meals"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();
        assert!(meals.is_loading());

        let state = meals.settled().await;
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.data.len(), 2);
        assert_eq!(api.meal_fetches.load(Ordering::SeqCst), 1);

        // Observing again is not a new request.
        let _ = meals.state();
        let _ = meals.subscribe();
        let _ = meals.settled().await;
        assert_eq!(api.meal_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn equal_request_does_not_retrigger() {
        let api = spawn_order_api().await.expect("spawn server");
        let meals = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            api.url("/meals"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();
        meals.settled().await;

        let changed = meals.set_request(api.url("/meals"), RequestConfig::default());
        assert!(!changed);
        assert!(!meals.is_loading());
        meals.settled().await;
        assert_eq!(api.meal_fetches.load(Ordering::SeqCst), 1);

        let changed = meals.set_request(
            api.url("/meals"),
            RequestConfig::get().with_header("Accept", "application/json"),
        );
        assert!(changed);
        meals.settled().await;
        assert_eq!(api.meal_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mutating_request_waits_for_trigger() {
        let api = spawn_order_api().await.expect("spawn server");
        let orders = RequestLifecycle::<Option<Value>>::new(
            reqwest::Client::new(),
            api.url("/orders"),
            RequestConfig::post_json(),
            None,
        )
        .unwrap();

        assert!(!orders.is_loading());
        assert_eq!(api.order_posts.load(Ordering::SeqCst), 0);

        let handle = orders.trigger(Some(json!({ "order": { "items": [{ "id": "m1" }] } })));
        assert!(orders.is_loading());
        handle.await.unwrap();

        let state = orders.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.data, Some(json!({ "message": "Order created!" })));
        assert_eq!(api.order_posts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_keeps_data_and_reports_server_message() {
        let api = spawn_order_api().await.expect("spawn server");
        let initial = json!({ "before": true });
        let stock = RequestLifecycle::<Value>::new(
            reqwest::Client::new(),
            api.url("/stock"),
            RequestConfig::post_json(),
            initial.clone(),
        )
        .unwrap();

        let state = stock.send(Some(json!({ "id": "m1" }))).await;

        assert_eq!(state.error.as_deref(), Some("out of stock"));
        assert!(!state.is_loading);
        assert_eq!(state.data, initial);
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let api = spawn_order_api().await.expect("spawn server");
        let broken = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            api.url("/broken"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();

        let state = broken.settled().await;
        assert_eq!(state.error.as_deref(), Some(FALLBACK_REQUEST_MESSAGE));
        assert!(state.data.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_settles() {
        let url = unreachable_url().await;
        let meals = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            url,
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();

        let state = meals.settled().await;
        assert!(!state.is_loading);
        assert!(state.error.is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn success_after_failure_clears_error() {
        let api = spawn_order_api().await.expect("spawn server");
        let meals = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            api.url("/broken"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();
        assert!(meals.settled().await.error.is_some());

        meals.set_request(api.url("/meals"), RequestConfig::get());
        let state = meals.settled().await;
        assert_eq!(state.error, None);
        assert_eq!(state.data.len(), 2);
    }

    #[tokio::test]
    async fn failure_after_success_keeps_previous_data() {
        let api = spawn_order_api().await.expect("spawn server");
        let orders = RequestLifecycle::<Option<Value>>::new(
            reqwest::Client::new(),
            api.url("/orders"),
            RequestConfig::post_json(),
            None,
        )
        .unwrap();

        let accepted = orders
            .send(Some(json!({ "order": { "items": [{ "id": "m1" }] } })))
            .await;
        let receipt = Some(json!({ "message": "Order created!" }));
        assert_eq!(accepted.data, receipt);

        let rejected = orders.send(Some(json!({ "order": { "items": [] } }))).await;
        assert_eq!(rejected.error.as_deref(), Some("Missing data."));
        assert!(!rejected.is_loading);
        assert_eq!(rejected.data, receipt);
    }

    #[tokio::test]
    async fn oversized_price_settles_with_error() {
        let api = spawn_order_api().await.expect("spawn server");
        let meals = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            api.url("/gold"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();

        let state = tokio::time::timeout(Duration::from_secs(5), meals.settled())
            .await
            .expect("lifecycle settles");
        assert!(!state.is_loading);
        assert!(state.data.is_empty());
        assert!(state.error.is_some_and(|e| e.contains("out of range")));
    }

    /// Decodes by panicking, standing in for any bug on the request task.
    #[derive(Debug, Clone)]
    struct Explosive;

    impl<'de> serde::Deserialize<'de> for Explosive {
        fn deserialize<D: serde::Deserializer<'de>>(_: D) -> Result<Self, D::Error> {
            panic!("decoder blew up")
        }
    }

    #[tokio::test]
    async fn panicking_request_still_settles() {
        let api = spawn_order_api().await.expect("spawn server");
        let meals = RequestLifecycle::<Vec<Explosive>>::new(
            reqwest::Client::new(),
            api.url("/meals"),
            RequestConfig::get(),
            Vec::new(),
        )
        .unwrap();

        let state = tokio::time::timeout(Duration::from_secs(5), meals.settled())
            .await
            .expect("lifecycle settles");
        assert!(!state.is_loading);
        assert!(state.error.is_some_and(|e| e.starts_with("Request aborted")));

        let again = tokio::time::timeout(Duration::from_secs(5), meals.send(None))
            .await
            .expect("send settles");
        assert!(again.error.is_some());
    }

    #[tokio::test]
    async fn clones_share_the_target_request() {
        let api = spawn_order_api().await.expect("spawn server");
        let stock = RequestLifecycle::<Option<Value>>::new(
            reqwest::Client::new(),
            api.url("/stock"),
            RequestConfig::post_json(),
            None,
        )
        .unwrap();
        let overlay = stock.clone();

        assert!(overlay.set_request(api.url("/orders"), RequestConfig::post_json()));
        assert_eq!(stock.request().url, api.url("/orders"));

        stock
            .trigger(Some(json!({ "order": { "items": [{ "id": "m1" }] } })))
            .await
            .unwrap();
        assert_eq!(overlay.error(), None);
        assert_eq!(overlay.data(), Some(json!({ "message": "Order created!" })));
        assert_eq!(api.order_posts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_resets_data_only() {
        let api = spawn_order_api().await.expect("spawn server");
        let orders = RequestLifecycle::<Option<Value>>::new(
            reqwest::Client::new(),
            api.url("/orders"),
            RequestConfig::post_json(),
            None,
        )
        .unwrap();
        orders.send(Some(json!({ "order": { "items": [] } }))).await;
        assert_eq!(orders.error().as_deref(), Some("Missing data."));

        orders.send(Some(json!({ "order": { "items": [{ "id": "m1" }] } }))).await;
        assert!(orders.data().is_some());

        orders.clear();
        let state = orders.state();
        assert_eq!(state.data, None);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_settled() {
        let api = spawn_order_api().await.expect("spawn server");
        let orders = RequestLifecycle::<Option<Value>>::new(
            reqwest::Client::new(),
            api.url("/orders"),
            RequestConfig::post_json(),
            None,
        )
        .unwrap();
        let mut rx = orders.subscribe();

        let handle = orders.trigger(Some(json!({ "order": { "items": [{ "id": "m2" }] } })));
        assert!(rx.borrow_and_update().is_loading);

        handle.await.unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_loading);
    }

    #[test]
    fn creation_outside_runtime_is_an_error() {
        let result = RequestLifecycle::<Vec<MenuItem>>::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/meals",
            RequestConfig::get(),
            Vec::new(),
        );
        assert!(matches!(result, Err(ClientError::NoRuntime)));
    }
}
