// HTTP controller trait for route registration.

use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tracing::debug;

use crate::injection::reply::TEXT_PLAIN;

/// Trait for adding routes to the HTTP server.
pub trait Controller: Send + Sync {
    /// Adds routes to the router.
    ///
    /// Controllers that dispatch on path prefixes register a fallback:
    /// ```rust
    /// # use axum::Router;
    /// # async fn handler() -> &'static str { "OK" }
    /// let router: Router<()> = Router::new().fallback(handler);
    /// # let _ = router;
    /// ```
    fn add_route(&self, router: Router) -> Router;
}

/// GET and POST are served; everything else is rejected.
pub fn is_supported(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST
}

/// Reply for methods the mock does not implement.
pub fn not_implemented(method: &Method) -> Response {
    debug!(
        component = "controller",
        event = "method_rejected",
        method = %method,
        "unsupported method"
    );
    (StatusCode::NOT_IMPLEMENTED, [(CONTENT_TYPE, TEXT_PLAIN)]).into_response()
}
