//! Recovery Stage
//!
//! The single fault boundary of the pipeline. A panic anywhere below this
//! stage is caught here, logged at error level with the request path and
//! method, and answered with a generic 500. No other stage converts panics.

use crate::pipeline::{Stage, StageFuture};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use futures::FutureExt;
use kernel::error::app_error::AppError;
use std::any::Any;
use std::panic::AssertUnwindSafe;

#[derive(Debug, Default, Clone, Copy)]
pub struct RecoveryStage;

impl RecoveryStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for RecoveryStage {
    fn name(&self) -> &'static str {
        "recovery"
    }

    fn handle<'a>(&'a self, req: Request, next: Next) -> StageFuture<'a> {
        Box::pin(async move {
            let method = req.method().clone();
            let path = req.uri().path().to_string();

            match AssertUnwindSafe(next.run(req)).catch_unwind().await {
                Ok(response) => response,
                Err(payload) => {
                    tracing::error!(
                        error = %panic_detail(payload.as_ref()),
                        path = %path,
                        method = %method,
                        "panic recovered"
                    );
                    AppError::internal("Internal Server Error").into_response()
                }
            }
        })
    }
}

/// Best-effort text of a panic payload
fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
