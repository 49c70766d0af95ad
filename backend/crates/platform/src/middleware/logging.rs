//! Logging Stage
//!
//! Emits one access-log event per request with method, path, final status
//! and elapsed time. The status is whatever the inner stages and handler
//! produced; this stage only observes it.

use crate::pipeline::{Stage, StageFuture};
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingStage;

impl LoggingStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for LoggingStage {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn handle<'a>(&'a self, req: Request, next: Next) -> StageFuture<'a> {
        Box::pin(async move {
            let mut entry = AccessLog::start(req.method().clone(), req.uri().path().to_string());

            let response = next.run(req).await;

            entry.finish(response.status());
            response
        })
    }
}

/// Pending access-log entry
///
/// If a panic unwinds through the logging stage before `finish` runs, the
/// entry is written on drop with the 500 the recovery stage answers with.
struct AccessLog {
    method: Method,
    path: String,
    started: Instant,
    done: bool,
}

impl AccessLog {
    fn start(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            started: Instant::now(),
            done: false,
        }
    }

    fn finish(&mut self, status: StatusCode) {
        self.done = true;
        tracing::info!(
            method = %self.method,
            path = %self.path,
            status = status.as_u16(),
            duration = ?self.elapsed(),
            "HTTP request"
        );
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for AccessLog {
    fn drop(&mut self) {
        if !self.done {
            tracing::warn!(
                method = %self.method,
                path = %self.path,
                status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                duration = ?self.elapsed(),
                "HTTP request aborted by fault"
            );
        }
    }
}
