use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;

/// Binds the listening socket on all interfaces.
pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind listener on {}", addr))
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = bind(cfg.settings.port).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    loop {
        let socket = match listener.accept().await {
            Ok((socket, _)) => socket,
            Err(e) => {
                tracing::warn!(error = %e, "Accept failed");
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };

        // A peer that already went away has no address.
        let peer = match socket.peer_addr() {
            Ok(peer) => peer,
            Err(e) => {
                tracing::debug!(error = %e, "Discarding connection that is not established");
                continue;
            }
        };

        info!("Accepted connection from {}", peer);

        let config = Arc::clone(&cfg);
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, config);
                if let Err(e) = conn.run().await {
                    tracing::warn!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(tracing::info_span!("connection", %peer)),
        );
    }
}
