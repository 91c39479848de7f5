mod config;
mod error;
mod server;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use server::DisasterGuidelinesServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting disaster-guidelines MCP server");

    let config = Config::from_env()?;
    info!(
        store_path = %config.store_path().display(),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    // The store is read per request, so a missing file is only reported here, not fatal.
    if !config.store_path().exists() {
        warn!(
            store_path = %config.store_path().display(),
            "guideline store not found, lookups will fail until it exists"
        );
    }

    let server = DisasterGuidelinesServer::new(config.store());

    match config.tcp_listen_addr.as_deref() {
        Some(addr) => serve_tcp(server, addr).await,
        None => serve_stdio(server).await,
    }
}

async fn serve_tcp(server: DisasterGuidelinesServer, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "accepting guideline clients on TCP");
    loop {
        let (stream, peer) = listener.accept().await?;
        let server = server.clone();
        tokio::spawn(async move {
            info!(peer = %peer, "guideline client connected");
            let session = match server.serve(stream).await {
                Ok(session) => session,
                Err(e) => {
                    error!(peer = %peer, error = %e, "guideline session handshake failed");
                    return;
                }
            };
            if let Err(e) = session.waiting().await {
                error!(peer = %peer, error = %e, "guideline session ended abnormally");
            }
            info!(peer = %peer, "guideline client disconnected");
        });
    }
}

async fn serve_stdio(server: DisasterGuidelinesServer) -> anyhow::Result<()> {
    info!("accepting guideline requests on stdio");
    let session = server.serve(stdio()).await.inspect_err(|e| {
        error!(error = %e, "stdio session handshake failed");
    })?;
    session.waiting().await?;
    info!("stdio session closed");
    Ok(())
}

