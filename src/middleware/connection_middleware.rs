//! One request per connection.

use axum::{
    http::{header::CONNECTION, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// ConnectionCloseMiddleware marks every response `Connection: close`, so no
/// socket accepted before `stop()` carries a further request.
pub struct ConnectionCloseMiddleware;

impl ConnectionCloseMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConnectionCloseMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Middleware for ConnectionCloseMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(SetResponseHeaderLayer::overriding(
            CONNECTION,
            HeaderValue::from_static("close"),
        ))
    }
}
