//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::controller::Controller;
use crate::middleware::Middleware;

const BACKLOG: u32 = 1024;

/// Server trait for HTTP server operations.
#[async_trait::async_trait]
pub trait Server: Send + Sync {
    /// Serves connections from `listener` until the shutdown token fires.
    async fn listen_and_serve(&self, listener: TcpListener) -> Result<()>;
}

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    name: String,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        name: impl Into<String>,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Self {
        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(router, middlewares);

        Self {
            shutdown_token,
            name: name.into(),
            router,
        }
    }

    /// Binds a listening socket with SO_REUSEADDR so a stopped server's port
    /// can be taken again immediately.
    pub fn bind(addr: SocketAddr) -> Result<TcpListener> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .context("failed to create TCP socket")?;

        socket
            .set_reuseaddr(true)
            .context("failed to enable SO_REUSEADDR")?;
        socket
            .bind(addr)
            .with_context(|| format!("failed to bind TCP listener on {}", addr))?;
        socket
            .listen(BACKLOG)
            .with_context(|| format!("failed to listen on {}", addr))
    }

    /// Runs the accept loop until the shutdown token is cancelled.
    ///
    /// Every connection runs on its own task. On shutdown the listener is
    /// dropped, which closes the socket; connection tasks already spawned
    /// keep running until their handlers finish.
    pub async fn listen_and_serve(&self, listener: TcpListener) -> Result<()> {
        let name = self.name.as_str();
        let addr = listener
            .local_addr()
            .context("failed to read listener address")?;

        info!(
            component = "server",
            event = "started",
            name = name,
            addr = %addr,
            "server started"
        );

        let serve_future = axum::serve(listener, self.router.clone()).into_future();

        tokio::select! {
            result = serve_future => {
                if let Err(e) = result {
                    error!(
                        component = "server",
                        event = "listen_and_serve_failed",
                        name = name,
                        addr = %addr,
                        error = %e,
                        "server failed to listen and serve"
                    );
                    return Err(e.into());
                }
            }
            _ = self.shutdown_token.cancelled() => {}
        }

        info!(
            component = "server",
            event = "stopped",
            name = name,
            addr = %addr,
            "server stopped"
        );

        Ok(())
    }

    /// Builds the router with all controllers.
    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        let mut router = Router::new();

        for controller in controllers {
            router = controller.add_route(router);
        }

        router
    }

    /// Merges middlewares into the router.
    fn merge_middlewares(router: Router, middlewares: Vec<Box<dyn Middleware>>) -> Router {
        let mut result = router;

        // Apply middlewares in reverse order (last middleware wraps first)
        for middleware in middlewares.iter().rev() {
            result = middleware.apply(result);
        }

        result
    }
}

#[async_trait::async_trait]
impl Server for HttpServer {
    async fn listen_and_serve(&self, listener: TcpListener) -> Result<()> {
        HttpServer::listen_and_serve(self, listener).await
    }
}
