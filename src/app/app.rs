// Mock server application lifecycle.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::http::HttpServer;
use crate::injection::AlternatingCounter;

use super::server::MockHttpServer;

/// A running mock server instance.
///
/// Owns its alternating counter, so instances started side by side in one
/// process never see each other's state.
pub struct App {
    cfg: Config,
    shutdown_token: CancellationToken,
    counter: Arc<AlternatingCounter>,
    local_addr: SocketAddr,
    handle: JoinHandle<Result<()>>,
}

impl App {
    /// Binds the listener and spawns the accept loop.
    pub async fn start(shutdown_token: CancellationToken, cfg: Config) -> Result<Self> {
        let addr = cfg.listen_addr()?;
        let listener = HttpServer::bind(addr)?;
        let local_addr = listener
            .local_addr()
            .context("failed to read bound address")?;

        let counter = Arc::new(AlternatingCounter::new());
        let server = MockHttpServer::new(shutdown_token.clone(), &cfg, counter.clone());

        let handle = tokio::task::spawn(async move {
            let result = server.listen_and_serve(listener).await;
            if let Err(ref e) = result {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }
            result
        });

        info!(
            component = "app",
            event = "started",
            addr = %local_addr,
            mode = ?cfg.mode(),
            "application lifecycle"
        );

        Ok(Self {
            cfg,
            shutdown_token,
            counter,
            local_addr,
            handle,
        })
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// Address the listener is actually bound to (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn counter(&self) -> &Arc<AlternatingCounter> {
        &self.counter
    }

    /// Checks whether the accept loop is still running. True from the moment
    /// `start` returns: the socket is already bound and listening by then.
    pub fn is_alive(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Closes the listening socket and joins the accept loop.
    /// In-flight requests are left to finish on their own.
    pub async fn stop(self) -> Result<()> {
        self.shutdown_token.cancel();
        let result = self.wait().await;

        info!(
            component = "app",
            event = "stopped",
            "application lifecycle"
        );

        result
    }

    /// Waits for the accept loop to exit without requesting it.
    pub async fn wait(self) -> Result<()> {
        self.handle.await.context("server task panicked")?
    }
}
