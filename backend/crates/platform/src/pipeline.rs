//! Middleware Pipeline
//!
//! An explicit, ordered list of [`Stage`] objects composed once around a
//! router. The first stage added is the outermost: it sees the request
//! first and the response last.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by [`Stage::handle`]
pub type StageFuture<'a> = Pin<Box<dyn Future<Output = Response> + Send + 'a>>;

/// One cross-cutting request-handling wrapper
///
/// A stage may inspect or rewrite the request, call `next`, and inspect or
/// rewrite the response. Returning without calling `next` short-circuits
/// every stage and handler below it.
pub trait Stage: Send + Sync + 'static {
    /// Stable name used in startup logs
    fn name(&self) -> &'static str;

    fn handle<'a>(&'a self, req: Request, next: Next) -> StageFuture<'a>;
}

/// Ordered stage list, outermost first
#[derive(Default, Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage inside all stages added so far
    pub fn stage<S: Stage>(self, stage: S) -> Self {
        self.shared_stage(Arc::new(stage))
    }

    /// Append an already shared stage
    pub fn shared_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stage names, outermost first
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Wrap every route and the fallback of `router`
    ///
    /// `Router::layer` makes the most recently applied layer the outermost,
    /// so stages are applied innermost first.
    pub fn wrap<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        tracing::info!(stages = ?self.names(), "Composing middleware pipeline");

        self.stages.into_iter().rev().fold(router, |router, stage| {
            router.layer(middleware::from_fn(move |req: Request, next: Next| {
                let stage = Arc::clone(&stage);
                async move { stage.handle(req, next).await }
            }))
        })
    }
}
