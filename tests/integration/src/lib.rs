//! Integration tests for the UserHub server.
//!
//! These tests require a running server at `localhost:4567`.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p userhub-integration -- --ignored
//! ```

use std::net::SocketAddr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("USERHUB_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4567".to_owned())
}

/// The port the server listens on, taken from the endpoint URL.
fn endpoint_port() -> u16 {
    endpoint_url()
        .rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4567)
}

/// Create an HTTP client pointing at the local server.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();

    reqwest::Client::builder()
        .build()
        .expect("failed to build client")
}

/// Create a client whose requests to `{subdomain}.users.localhost` resolve to
/// the local server, exercising host-based routing without DNS.
#[must_use]
pub fn subdomain_client(subdomain: &str) -> (reqwest::Client, String) {
    init_tracing();

    let port = endpoint_port();
    let host = format!("{subdomain}.users.localhost");
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();

    let client = reqwest::Client::builder()
        .resolve(&host, addr)
        .build()
        .expect("failed to build client");

    (client, format!("http://{host}:{port}"))
}

/// Generate a unique first name for a test so runs don't interfere.
#[must_use]
pub fn test_user_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("{prefix}{id}")
}

/// Create a user and return its identifier (the lowercased first name).
pub async fn create_test_user(client: &reqwest::Client, prefix: &str) -> String {
    let name = test_user_name(prefix);
    let resp = client
        .post(format!("{}/users", endpoint_url()))
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({
            "first_name": name,
            "last_name": "Tester",
            "age": 33,
        }))
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create user {name}: {e}"));
    assert_eq!(resp.status(), 201, "create should return 201 for {name}");
    name.to_lowercase()
}

/// URL of a user resource.
#[must_use]
pub fn user_url(id: &str) -> String {
    format!("{}/users/{id}", endpoint_url())
}

mod test_negotiation;
mod test_routing;
mod test_views;
