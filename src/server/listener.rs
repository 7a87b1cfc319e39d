use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::config::{MAX_ACTIVE_SESSIONS, SESSION_BUDGET};
use crate::http::connection::Session;
use crate::server::static_files::StaticFiles;

/// Binds the listening socket and dispatches accepted connections.
///
/// Accept runs on its own task and never blocks on request processing. At
/// most [`MAX_ACTIVE_SESSIONS`] sessions run concurrently; a connection
/// accepted while the pool is saturated holds its socket and waits for a
/// permit, so accepts are delayed under load but never refused. A bind or
/// accept failure is fatal; a failure inside one session is logged and
/// contained.
pub async fn run(port: u16, files: StaticFiles) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!(port, root = %files.root().display(), "waiting for client connections");
    serve(listener, files).await
}

/// Accept loop over an already-bound listener.
pub async fn serve(listener: TcpListener, files: StaticFiles) -> anyhow::Result<()> {
    let pool = Arc::new(Semaphore::new(MAX_ACTIVE_SESSIONS));

    loop {
        let (socket, peer) = listener.accept().await.context("accept failed")?;
        info!(%peer, "accepted connection");

        let pool = pool.clone();
        let files = files.clone();
        tokio::spawn(async move {
            // Queue here when all session slots are busy. The semaphore is
            // never closed, so acquire can only fail if the pool is dropped.
            let Ok(_permit) = pool.acquire_owned().await else {
                return;
            };

            let mut session = Session::new(socket, files, SESSION_BUDGET);
            match session.run().await {
                Ok(()) => info!(%peer, "connection closed"),
                Err(e) => error!(%peer, error = %e, "session failed"),
            }
        });
    }
}
