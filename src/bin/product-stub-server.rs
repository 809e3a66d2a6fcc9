use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "product_stub_server/handlers.rs"]
mod handlers;
use self::handlers::*;

#[derive(Parser)]
#[command(name = "product-stub-server")]
#[command(about = "Stand-in for the product and capture services (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Answer `POST /product/deactivate` with 500
    #[arg(long)]
    fail_deactivate: bool,

    /// Answer `POST /product/{id}/activate` with 500
    #[arg(long)]
    fail_activate: bool,

    /// Answer the capture service route with 500
    #[arg(long)]
    fail_capture: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct FailFlags {
    deactivate: bool,
    activate: bool,
    capture: bool,
}

struct AppState {
    fail: FailFlags,

    // Every call received, in arrival order.
    calls: RwLock<Vec<CallRecord>>,
}

#[derive(Clone, Debug, serde::Serialize)]
struct CallRecord {
    service: String,
    action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    view_id: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let state = Arc::new(AppState {
        fail: FailFlags {
            deactivate: args.fail_deactivate,
            activate: args.fail_activate,
            capture: args.fail_capture,
        },
        calls: RwLock::new(Vec::new()),
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/calls", get(list_calls))
        .route("/product/deactivate", post(deactivate_all))
        .route("/product/:product_id/activate", post(activate_product))
        .route(
            "/api/capture/set-product-id/:product_id/:view_id",
            post(set_capture_product),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("product-stub-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
