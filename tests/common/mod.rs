//! Shared utilities for router and end-to-end tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};
use jsonwebtoken::{get_current_timestamp, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use tag_suggester::auth::{sign_token, Claims};
use tag_suggester::config::ServiceConfig;
use tag_suggester::http::HttpServer;
use tag_suggester::lifecycle::Shutdown;

pub const SECRET: &str = "integration-secret";

/// Defaults plus a secret: the smallest config that validates.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.auth.secret = SECRET.to_string();
    config
}

fn claims(exp_offset_secs: i64) -> Claims {
    let now = get_current_timestamp();
    Claims {
        sub: Some("tester".into()),
        iat: Some(now),
        exp: Some(now.saturating_add_signed(exp_offset_secs)),
        ..Default::default()
    }
}

/// A token valid for ten minutes.
pub fn valid_token() -> String {
    sign_token(SECRET, &claims(600)).unwrap()
}

/// A token that expired two minutes ago.
#[allow(dead_code)]
pub fn expired_token() -> String {
    sign_token(SECRET, &claims(-120)).unwrap()
}

#[allow(dead_code)]
pub fn token_signed_with(secret: &str) -> String {
    sign_token(secret, &claims(600)).unwrap()
}

#[allow(dead_code)]
pub fn token_with_algorithm(algorithm: Algorithm) -> String {
    jsonwebtoken::encode(
        &Header::new(algorithm),
        &claims(600),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

/// A successful Ollama chat reply whose content is `content`.
#[allow(dead_code)]
pub fn chat_reply(content: &str) -> Value {
    json!({
        "model": "mistral:7b",
        "created_at": "2024-01-01T00:00:00Z",
        "message": { "role": "assistant", "content": content },
        "done": true
    })
}

/// Start a programmable mock Ollama runtime on an ephemeral port.
///
/// `f` receives the JSON body posted to `/api/chat` and returns the status
/// and JSON body to answer with.
#[allow(dead_code)]
pub async fn start_mock_ollama<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (StatusCode, Value)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    let app = Router::new().route(
        "/api/chat",
        post(move |Json(body): Json<Value>| {
            let f = f.clone();
            async move {
                let (status, reply) = f(body).await;
                (status, Json(reply))
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Run the service on an ephemeral port until the returned handle is triggered.
#[allow(dead_code)]
pub async fn spawn_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let stop = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });
    (addr, shutdown)
}
