//! Rate Limiting Infrastructure
//!
//! Fixed-window, per-client request counting with a collective reset.
//!
//! Every `window`, a background task swaps the whole counter map for an
//! empty one, so all clients get a fresh budget at the same instant. A
//! client can therefore spend a full budget just before a reset and another
//! one just after it. That burst is accepted behaviour of a fixed window.

use crate::client::{ClientIdentity, client_identity};
use crate::pipeline::{Stage, StageFuture};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Per-window count at which a client's request is rejected; the
    /// request that reaches it is the first refused
    pub max_requests: u32,
    /// Time between collective resets
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Outcome of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { count: u32 },
    Exceeded { count: u32 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

type Visits = Arc<Mutex<HashMap<ClientIdentity, u32>>>;

/// Per-client counters plus the task that clears them
///
/// Must be created inside a tokio runtime. The reset task stops on
/// [`FixedWindowRateLimiter::shutdown`] or when the limiter is dropped.
pub struct FixedWindowRateLimiter {
    config: RateLimitConfig,
    visits: Visits,
    shutdown_tx: watch::Sender<bool>,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl FixedWindowRateLimiter {
    pub fn start(config: RateLimitConfig) -> Arc<Self> {
        let visits: Visits = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let reset_task = tokio::spawn(run_reset_loop(
            Arc::clone(&visits),
            config.window,
            shutdown_rx,
        ));

        tracing::info!(
            max_requests = config.max_requests,
            window = ?config.window,
            "Rate limiter started"
        );

        Arc::new(Self {
            config,
            visits,
            shutdown_tx,
            reset_task: Mutex::new(Some(reset_task)),
        })
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request for `client` and decide whether it may proceed
    pub fn check(&self, client: ClientIdentity) -> RateLimitDecision {
        let count = {
            let mut visits = lock(&self.visits);
            let count = visits.entry(client).or_insert(0);
            *count = count.saturating_add(1);
            *count
        };

        if count >= self.config.max_requests {
            RateLimitDecision::Exceeded { count }
        } else {
            RateLimitDecision::Allowed { count }
        }
    }

    /// Requests counted for `client` in the current window
    pub fn visits(&self, client: ClientIdentity) -> u32 {
        lock(&self.visits).get(&client).copied().unwrap_or(0)
    }

    pub fn is_running(&self) -> bool {
        lock(&self.reset_task)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stop the reset task and wait for it to exit. Idempotent.
    pub async fn shutdown(&self) {
        // Err only means the task already exited
        let _ = self.shutdown_tx.send(true);

        let task = lock(&self.reset_task).take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Rate limiter reset task ended abnormally");
            }
            tracing::info!("Rate limiter stopped");
        }
    }
}

impl Drop for FixedWindowRateLimiter {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn run_reset_loop(visits: Visits, window: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(window) => {
                let cleared = std::mem::take(&mut *lock(&visits)).len();
                tracing::debug!(clients = cleared, "Rate limit window reset");
            }
            changed = shutdown_rx.changed() => {
                // Err: the limiter (and its sender) is gone
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }
}

/// Counter state stays consistent even if a holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pipeline stage enforcing the fixed-window limit
///
/// Only admits or rejects; it never catches faults from the handler.
pub struct RateLimitStage {
    limiter: Arc<FixedWindowRateLimiter>,
}

impl RateLimitStage {
    pub fn new(limiter: Arc<FixedWindowRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl Stage for RateLimitStage {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    fn handle<'a>(&'a self, req: Request, next: Next) -> StageFuture<'a> {
        Box::pin(async move {
            let client = match client_identity(&req) {
                Ok(client) => client,
                Err(e) => {
                    tracing::debug!(error = %e, "Cannot identify client");
                    return AppError::from(e).into_response();
                }
            };

            match self.limiter.check(client) {
                RateLimitDecision::Allowed { .. } => next.run(req).await,
                RateLimitDecision::Exceeded { count } => {
                    tracing::warn!(
                        ip = %client,
                        count = count,
                        max = self.limiter.config().max_requests,
                        "Rate limit exceeded"
                    );
                    AppError::too_many_requests("Rate Limit Exceeded").into_response()
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use axum::Router;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::net::{IpAddr, SocketAddr};
    use tower::ServiceExt;

    fn client(ip: &str) -> ClientIdentity {
        ClientIdentity::new(ip.parse::<IpAddr>().unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_reaching_limit_is_rejected() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(3, 60));
        let a = client("10.0.0.1");

        assert_eq!(limiter.check(a), RateLimitDecision::Allowed { count: 1 });
        assert_eq!(limiter.check(a), RateLimitDecision::Allowed { count: 2 });
        assert_eq!(limiter.check(a), RateLimitDecision::Exceeded { count: 3 });
        assert_eq!(limiter.check(a), RateLimitDecision::Exceeded { count: 4 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_counted_separately() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(2, 60));

        assert!(limiter.check(client("10.0.0.1")).is_allowed());
        assert!(limiter.check(client("10.0.0.2")).is_allowed());
        assert!(!limiter.check(client("10.0.0.1")).is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_every_client_at_once() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(3, 60));
        let a = client("10.0.0.1");
        let b = client("10.0.0.2");

        for _ in 0..4 {
            limiter.check(a);
        }
        limiter.check(b);
        assert_eq!(limiter.visits(a), 4);
        assert_eq!(limiter.visits(b), 1);

        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(limiter.visits(a), 0);
        assert_eq!(limiter.visits(b), 0);
        assert!(limiter.check(a).is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_survive_until_window_ends() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(3, 60));
        let a = client("10.0.0.1");
        limiter.check(a);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(limiter.visits(a), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_reset_task() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(3, 60));
        assert!(limiter.is_running());

        limiter.shutdown().await;
        assert!(!limiter.is_running());

        let a = client("10.0.0.1");
        limiter.check(a);
        tokio::time::sleep(Duration::from_secs(180)).await;
        assert_eq!(limiter.visits(a), 1);

        // second call is a no-op
        limiter.shutdown().await;
    }

    fn request_from(addr: Option<&str>) -> Request {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        if let Some(addr) = addr {
            req.extensions_mut()
                .insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        }
        req
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_rejects_request_reaching_limit() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::new(3, 60));
        let app = Pipeline::new()
            .stage(RateLimitStage::new(Arc::clone(&limiter)))
            .wrap(Router::new().route("/", get(|| async { "ok" })));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(request_from(Some("10.0.0.1:4000")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(request_from(Some("10.0.0.1:4001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let other = app
            .oneshot(request_from(Some("10.0.0.2:4000")))
            .await
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_rejects_unidentifiable_client() {
        let limiter = FixedWindowRateLimiter::start(RateLimitConfig::default());
        let app = Pipeline::new()
            .stage(RateLimitStage::new(limiter))
            .wrap(Router::new().route("/", get(|| async { "ok" })));

        let response = app.oneshot(request_from(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
