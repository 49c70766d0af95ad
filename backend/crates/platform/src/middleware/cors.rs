//! CORS Stage
//!
//! Outermost stage. Runs `tower_http`'s CORS layer around the rest of the
//! pipeline, so cross-origin headers land on every response that leaves
//! it, including 429s and recovered 500s. Preflight requests are answered
//! here with 204 and never reach an inner stage.

use crate::pipeline::{Stage, StageFuture};
use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::IntoResponse;
use std::convert::Infallible;
use tower::{Layer, ServiceExt, service_fn};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Cross-origin policy
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origin: HeaderValue,
    pub allow_methods: Vec<Method>,
    pub allow_headers: Vec<header::HeaderName>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ],
            allow_headers: vec![header::CONTENT_TYPE],
        }
    }
}

impl CorsConfig {
    /// Permissive policy for an explicit origin (or `*`)
    pub fn with_origin(origin: HeaderValue) -> Self {
        Self {
            allow_origin: origin,
            ..Self::default()
        }
    }

    fn into_layer(self) -> CorsLayer {
        let origin = if self.allow_origin == "*" {
            AllowOrigin::any()
        } else {
            AllowOrigin::exact(self.allow_origin)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AllowMethods::list(self.allow_methods))
            .allow_headers(AllowHeaders::list(self.allow_headers))
    }
}

pub struct CorsStage {
    cors: CorsLayer,
}

impl CorsStage {
    pub fn new(config: CorsConfig) -> Self {
        Self {
            cors: config.into_layer(),
        }
    }
}

impl Stage for CorsStage {
    fn name(&self) -> &'static str {
        "cors"
    }

    fn handle<'a>(&'a self, req: Request, next: Next) -> StageFuture<'a> {
        Box::pin(async move {
            let preflight = req.method() == Method::OPTIONS;
            if preflight {
                tracing::debug!(path = %req.uri().path(), "CORS preflight answered");
            }

            let inner = service_fn(move |req: Request| {
                let next = next.clone();
                async move {
                    let response = if preflight {
                        StatusCode::NO_CONTENT.into_response()
                    } else {
                        next.run(req).await
                    };
                    Ok::<_, Infallible>(response)
                }
            });

            let mut response = match self.cors.layer(inner).oneshot(req).await {
                Ok(response) => response,
                Err(never) => match never {},
            };

            if preflight {
                *response.status_mut() = StatusCode::NO_CONTENT;
            }
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use axum::Router;
    use axum::body::Body;
    use axum::routing::get;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let router = Router::new().route(
            "/missions",
            get(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "[]"
                }
            }),
        );
        Pipeline::new()
            .stage(CorsStage::new(CorsConfig::default()))
            .wrap(router)
    }

    fn header_text<'r>(response: &'r axum::response::Response, name: header::HeaderName) -> &'r str {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(Arc::clone(&hits))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/missions")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        let methods = header_text(&response, header::ACCESS_CONTROL_ALLOW_METHODS);
        for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "missing {method} in {methods}");
        }
        assert_eq!(
            header_text(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
            "content-type"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bare_options_never_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(Arc::clone(&hits))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/missions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_normal_response_carries_headers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(Arc::clone(&hits))
            .oneshot(
                Request::builder()
                    .uri("/missions")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_response_carries_headers() {
        let app = Pipeline::new()
            .stage(CorsStage::new(CorsConfig::default()))
            .wrap(Router::new().route(
                "/profile",
                get(|| async { StatusCode::TOO_MANY_REQUESTS }),
            ));

        let response = app
            .oneshot(Request::builder().uri("/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn test_custom_origin() {
        let stage = CorsStage::new(CorsConfig::with_origin(HeaderValue::from_static(
            "http://localhost:5173",
        )));
        let app = Pipeline::new()
            .stage(stage)
            .wrap(Router::new().route("/profile", get(|| async { "{}" })));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/profile")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "http://localhost:5173"
        );
    }
}
