// src/server/listener.rs

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::errors::Result;
use crate::server::connection::handle_connection;
use crate::service::ImportService;

/// Accepts connections and hands each one to its own task.
///
/// Jobs from all connections share a pool of `max_workers` permits. A request
/// that arrives while every permit is taken waits in the transport layer until
/// one frees up.
pub struct Server {
    listener: TcpListener,
    service: Arc<ImportService>,
    workers: Arc<Semaphore>,
}

impl Server {
    pub async fn bind(
        addr: SocketAddr,
        service: Arc<ImportService>,
        max_workers: usize,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            service,
            workers: Arc::new(Semaphore::new(max_workers.max(1))),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves. In-flight connections are not awaited;
    /// their children are killed when the runtime drops them.
    pub async fn serve_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; no longer accepting connections");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            info!(%peer, "accepted connection");
                            let service = Arc::clone(&self.service);
                            let workers = Arc::clone(&self.workers);
                            tokio::spawn(async move {
                                handle_connection(stream, peer, service, workers).await;
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                        }
                    }
                }
            }
        }
    }

    /// Serve forever.
    pub async fn serve(self) -> Result<()> {
        self.serve_until(std::future::pending()).await
    }
}
