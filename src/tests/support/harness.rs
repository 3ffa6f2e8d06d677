// Mock server bootstrap for end-to-end tests.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::{self, Config, ConfigTrait, Mode};

/// Mock server wrapper for tests.
pub struct MockServer {
    base: String,
    app: App,
}

impl MockServer {
    /// Starts a server from `cfg` and waits until it answers.
    pub async fn start(cfg: Config) -> Self {
        let app = App::start(CancellationToken::new(), cfg)
            .await
            .unwrap_or_else(|e| panic!("failed to start mock server: {:#}", e));
        let base = format!("http://{}", app.local_addr());

        // Hang-only servers never finish a response.
        if app.cfg().mode() == Mode::FailureInjection {
            wait_http_ready(&format!("{}/healthcheck", base)).await;
        }

        Self { base, app }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Stops the server.
    pub async fn stop(self) {
        self.app.stop().await.expect("stop mock server");
    }
}

/// Starts a server with the default test config.
pub async fn start_default() -> MockServer {
    MockServer::start(config::new_test_config()).await
}

/// Waits for HTTP server to be ready.
async fn wait_http_ready(url: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    let client = reqwest::Client::new();
    while tokio::time::Instant::now() < deadline {
        if let Ok(resp) = client.get(url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("http not ready: {}", url);
}
