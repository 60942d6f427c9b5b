//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limit, metrics)
//! - Put the bearer gate in front of the protected route only
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Request},
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{require_bearer, TokenVerifier};
use crate::config::{CorsConfig, ServiceConfig};
use crate::http::handlers::{healthcheck, suggest_tags};
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::observability::metrics;
use crate::tagging::{LanguageModel, ModelError, OllamaClient, TagSuggestionService};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tags: Arc<TagSuggestionService>,
    pub legacy_validation_status: bool,
}

/// HTTP server for the tag suggestion service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server backed by the Ollama runtime named in the configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ModelError> {
        let model = OllamaClient::new(&config.model)?;
        tracing::info!(
            model = %config.model.model,
            base_url = %config.model.base_url,
            request_timeout_secs = config.model.request_timeout_secs,
            context_window = config.model.context_window,
            "Language model client configured"
        );
        Ok(Self::with_model(config, Arc::new(model)))
    }

    /// Create a server backed by any [`LanguageModel`].
    pub fn with_model(config: ServiceConfig, model: Arc<dyn LanguageModel>) -> Self {
        let verifier = Arc::new(TokenVerifier::new(&config.auth));
        let state = AppState {
            tags: Arc::new(TagSuggestionService::new(model)),
            legacy_validation_status: config.http.legacy_validation_status,
        };

        let router = Self::build_router(&config, state, verifier);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState, verifier: Arc<TokenVerifier>) -> Router {
        let protected = Router::new()
            .route("/suggest-tags", post(suggest_tags))
            .route_layer(middleware::from_fn_with_state(verifier, require_bearer))
            // enforced by the Json extractor, so only after the gate passes
            .layer(DefaultBodyLimit::max(config.http.max_body_size));

        Router::new()
            .route("/healthcheck", get(healthcheck))
            .merge(protected)
            .with_state(state)
            .layer(middleware::from_fn(track_requests))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(cors_layer(&config.cors))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Permissive CORS: any origin (mirrored, so credentials stay legal), any
/// method, any header. A non-empty origin list narrows the origins unless it
/// contains `*`.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let any_origin = config.allowed_origins.is_empty()
        || config.allowed_origins.iter().any(|o| o.trim() == "*");
    let origins = if any_origin {
        AllowOrigin::mirror_request()
    } else {
        let list: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

/// Record per-route request counts and latency.
async fn track_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let request_id = request_id_of(&request);

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = %route,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );
    metrics::record_request(&method, &route, status, started);

    response
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    async fn preflight(config: CorsConfig, origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/suggest-tags", post(|| async { StatusCode::OK }))
            .layer(cors_layer(&config));
        let request = HttpRequest::builder()
            .method(Method::OPTIONS)
            .uri("/suggest-tags")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn wildcard_origin_mirrors_any_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["*".into()],
            allow_credentials: true,
        };
        assert_eq!(
            preflight(config, "http://shop.example").await.unwrap(),
            "http://shop.example"
        );
    }

    #[tokio::test]
    async fn origin_list_narrows_allowed_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://shop.example".into()],
            allow_credentials: true,
        };
        assert_eq!(
            preflight(config.clone(), "http://shop.example").await.unwrap(),
            "http://shop.example"
        );
        assert!(preflight(config, "http://evil.example").await.is_none());
    }
}
