//! Access log middleware.

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// TraceMiddleware logs every request and its response status at debug level.
pub struct TraceMiddleware {
    level: Level,
}

impl TraceMiddleware {
    pub fn new() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Middleware for TraceMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(self.level))
                .on_request(DefaultOnRequest::new().level(self.level))
                .on_response(DefaultOnResponse::new().level(self.level)),
        )
    }
}
