//! UserHub Server - an in-memory users resource API.
//!
//! This binary serves the `/users` CRUD surface built on `userhub-http`,
//! including content negotiation between JSON and XML, and the read-only
//! `api1`/`api2` subdomain projections of the collection.
//!
//! # Usage
//!
//! ```text
//! USERHUB_LISTEN=0.0.0.0:4567 userhub-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `USERHUB_LISTEN` | `0.0.0.0:4567` | Bind address |
//! | `USERHUB_DOMAIN` | `users.localhost` | Base domain for subdomain routing |
//! | `USERHUB_SEED` | `true` | Seed the store with sample users |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use userhub_core::{UserHubConfig, UserService, UserStore};
use userhub_http::service::{UsersHttpConfig, UsersHttpService};

use crate::handler::UserHubHandler;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the store, seeded or empty per configuration.
fn build_store(config: &UserHubConfig) -> Arc<UserStore> {
    if config.seed_sample_users {
        Arc::new(UserStore::with_sample_users())
    } else {
        Arc::new(UserStore::new())
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<H: userhub_http::dispatch::UsersHandler>(
    listener: TcpListener,
    service: UsersHttpService<H>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = UserHubConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        listen = %config.listen,
        domain = %config.domain,
        seed_sample_users = config.seed_sample_users,
        version = VERSION,
        "starting UserHub Server",
    );

    let store = build_store(&config);
    let service = UserService::new(store);
    let handler = UserHubHandler::new(service);
    let http_config = UsersHttpConfig {
        domain: config.domain.clone(),
    };
    let http_service = UsersHttpService::new(handler, http_config);

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, http_service).await
}
