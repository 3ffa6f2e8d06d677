// HTTP server wiring for the mock application.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ConfigTrait, Mode};
use crate::http::{Controller, Middleware, Server as HttpServerTrait};
use crate::injection::{AlternatingCounter, Dispatcher};

/// HTTP server wrapping the mode-specific controller and the middlewares.
pub struct MockHttpServer {
    server: Arc<dyn HttpServerTrait>,
}

impl MockHttpServer {
    pub fn new(ctx: CancellationToken, cfg: &Config, counter: Arc<AlternatingCounter>) -> Self {
        let server = crate::http::HttpServer::new(
            ctx,
            cfg.api().name.clone(),
            Self::controllers(cfg, counter),
            Self::middlewares(),
        );

        Self {
            server: Arc::new(server),
        }
    }

    /// Serves until shutdown (blocking call).
    pub async fn listen_and_serve(&self, listener: TcpListener) -> Result<()> {
        self.server.listen_and_serve(listener).await
    }

    /// Returns the controller set for the configured mode.
    fn controllers(cfg: &Config, counter: Arc<AlternatingCounter>) -> Vec<Box<dyn Controller>> {
        use crate::controller;

        match cfg.mode() {
            // Path-prefix table of simulated faults
            Mode::FailureInjection => {
                let dispatcher = Arc::new(Dispatcher::new(counter, cfg));
                let handler: Box<dyn Controller> =
                    Box::new(controller::FailureInjectionController::new(dispatcher));
                vec![handler]
            }
            // Legacy: every request hangs
            Mode::HangOnly => {
                let handler: Box<dyn Controller> =
                    Box::new(controller::HangOnlyController::new(cfg.hang().duration));
                vec![handler]
            }
        }
    }

    /// Returns the request middlewares for the server, executed in reverse order.
    fn middlewares() -> Vec<Box<dyn Middleware>> {
        vec![
            // Exec first - access log
            Box::new(crate::middleware::TraceMiddleware::new()),
            // Exec second - no keep-alive
            Box::new(crate::middleware::ConnectionCloseMiddleware::new()),
        ]
    }
}
